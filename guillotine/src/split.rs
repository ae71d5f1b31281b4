//! Guillotine splitting: carving an item out of the corner of a free rectangle
//! and describing the space left over.

use crate::{
    error::{Error, Result},
    geometry::Rect,
};

/// The free space left over after placing an item in the minimum corner of a
/// free rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Splits {
    /// The item filled the free rectangle exactly.
    None,

    /// The item matched the free rectangle along one axis.
    One(Rect),

    /// `smaller` is the strip running alongside the item, `bigger` spans the
    /// whole free rectangle along the axis with the most slack.
    Two { smaller: Rect, bigger: Rect },
}

impl Splits {
    pub fn rects(self) -> impl Iterator<Item = Rect> {
        let (first, second) = match self {
            Splits::None => (None, None),
            Splits::One(rect) => (Some(rect), None),
            Splits::Two { smaller, bigger } => (Some(bigger), Some(smaller)),
        };

        first.into_iter().chain(second)
    }
}

/// Splits `space` around an item of size `item` placed at `space`'s minimum
/// corner.
///
/// The caller is expected to have chosen a `space` large enough for the item.
pub(crate) fn split(item: (u32, u32), space: Rect) -> Result<Splits> {
    if !space.fits(item) {
        return Err(Error::SplitFailed { item, space });
    }

    let (x, y) = space.pos;
    let (item_w, item_h) = item;
    let (space_w, space_h) = space.size;

    let dw = space_w - item_w;
    let dh = space_h - item_h;

    let splits = match (dw, dh) {
        (0, 0) => Splits::None,
        (_, 0) => Splits::One(Rect::new((x + item_w, y), (dw, item_h))),
        (0, _) => Splits::One(Rect::new((x, y + item_h), (item_w, dh))),

        // More room to the right: keep a full-height column there.
        _ if dw > dh => Splits::Two {
            smaller: Rect::new((x, y + item_h), (item_w, dh)),
            bigger: Rect::new((x + item_w, y), (dw, space_h)),
        },

        // More (or equal) room above: keep a full-width row there.
        _ => Splits::Two {
            smaller: Rect::new((x + item_w, y), (dw, item_h)),
            bigger: Rect::new((x, y + item_h), (space_w, dh)),
        },
    };

    Ok(splits)
}

#[cfg(test)]
mod test {
    use super::*;

    fn total_area(item: (u32, u32), splits: Splits) -> u64 {
        splits.rects().map(|rect| rect.area()).sum::<u64>() + Rect::from_size(item).area()
    }

    #[test]
    fn perfect_fit() {
        let space = Rect::new((5, 5), (10, 10));

        assert_eq!(split((10, 10), space), Ok(Splits::None));
    }

    #[test]
    fn leftover_to_the_right() {
        let space = Rect::new((5, 5), (30, 10));

        assert_eq!(
            split((10, 10), space),
            Ok(Splits::One(Rect::new((15, 5), (20, 10))))
        );
    }

    #[test]
    fn leftover_above() {
        let space = Rect::new((5, 5), (10, 30));

        assert_eq!(
            split((10, 10), space),
            Ok(Splits::One(Rect::new((5, 15), (10, 20))))
        );
    }

    #[test]
    fn wider_slack_keeps_right_column() {
        let space = Rect::new((0, 0), (100, 50));
        let splits = split((10, 20), space).unwrap();

        assert_eq!(
            splits,
            Splits::Two {
                smaller: Rect::new((0, 20), (10, 30)),
                bigger: Rect::new((10, 0), (90, 50)),
            }
        );
        assert_eq!(total_area((10, 20), splits), space.area());
    }

    #[test]
    fn taller_slack_keeps_top_row() {
        let space = Rect::new((0, 0), (50, 100));
        let splits = split((20, 10), space).unwrap();

        assert_eq!(
            splits,
            Splits::Two {
                smaller: Rect::new((20, 0), (30, 10)),
                bigger: Rect::new((0, 10), (50, 90)),
            }
        );
        assert_eq!(total_area((20, 10), splits), space.area());
    }

    #[test]
    fn equal_slack_keeps_top_row() {
        let space = Rect::new((0, 0), (100, 100));
        let splits = split((50, 50), space).unwrap();

        assert_eq!(
            splits,
            Splits::Two {
                smaller: Rect::new((50, 0), (50, 50)),
                bigger: Rect::new((0, 50), (100, 50)),
            }
        );
    }

    #[test]
    fn oversized_item_fails() {
        let space = Rect::new((0, 0), (10, 10));

        assert_eq!(
            split((11, 5), space),
            Err(Error::SplitFailed {
                item: (11, 5),
                space
            })
        );
        assert!(split((5, 11), space).is_err());
    }

    #[test]
    fn bigger_comes_first() {
        let space = Rect::new((0, 0), (100, 100));
        let rects: Vec<_> = split((50, 50), space).unwrap().rects().collect();

        assert_eq!(
            rects,
            vec![
                Rect::new((0, 50), (100, 50)),
                Rect::new((50, 0), (50, 50)),
            ]
        );
    }
}
