/// An axis-aligned rectangle on the atlas surface.
///
/// `Rect` is an immutable value: a position (the minimum corner) and a size.
/// All coordinates are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub(crate) pos: (u32, u32),
    pub(crate) size: (u32, u32),
}

impl Rect {
    #[inline]
    pub fn new(pos: (u32, u32), size: (u32, u32)) -> Self {
        Self { pos, size }
    }

    /// A rectangle of the given size anchored at the origin.
    #[inline]
    pub fn from_size(size: (u32, u32)) -> Self {
        Self { pos: (0, 0), size }
    }

    #[inline]
    pub fn pos(&self) -> (u32, u32) {
        self.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.1
    }

    #[inline]
    pub fn min(&self) -> (u32, u32) {
        self.pos
    }

    /// The exclusive maximum corner of the rectangle.
    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    #[inline]
    pub fn area(&self) -> u64 {
        area_of(self.size)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.0 == 0 || self.size.1 == 0
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.pos.0 as f32 + self.size.0 as f32 / 2.0,
            self.pos.1 as f32 + self.size.1 as f32 / 2.0,
        )
    }

    /// Whether an item of the given size could be placed inside this
    /// rectangle.
    #[inline]
    pub fn fits(&self, size: (u32, u32)) -> bool {
        size.0 <= self.size.0 && size.1 <= self.size.1
    }

    /// Tells whether the interiors of the two rectangles overlap. Rectangles
    /// that only share an edge do not intersect, and neither do empty ones.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        let x_overlap = a_min.0 < b_max.0 && b_min.0 < a_max.0;
        let y_overlap = a_min.1 < b_max.1 && b_min.1 < a_max.1;

        x_overlap && y_overlap
    }

    /// Whether `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());

        a_min.0 <= b_min.0 && a_min.1 <= b_min.1 && b_max.0 <= a_max.0 && b_max.1 <= a_max.1
    }
}

#[inline]
pub(crate) fn area_of(size: (u32, u32)) -> u64 {
    u64::from(size.0) * u64::from(size.1)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new((0, 0), (10, 10));
        let right = Rect::new((10, 0), (10, 10));
        let above = Rect::new((0, 10), (10, 10));

        assert!(!a.intersects(&right));
        assert!(!a.intersects(&above));
        assert!(!right.intersects(&a));
    }

    #[test]
    fn overlapping_intersect() {
        let a = Rect::new((0, 0), (10, 10));
        let b = Rect::new((9, 9), (4, 4));
        let inner = Rect::new((2, 2), (1, 1));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(a.intersects(&inner));
    }

    #[test]
    fn empty_never_intersects() {
        let a = Rect::new((0, 0), (10, 10));
        let empty = Rect::new((5, 5), (0, 3));

        assert!(!a.intersects(&empty));
    }

    #[test]
    fn containment() {
        let outer = Rect::from_size((100, 100));

        assert!(outer.contains(&Rect::new((90, 0), (10, 100))));
        assert!(!outer.contains(&Rect::new((91, 0), (10, 100))));
        assert!(outer.contains(&outer));
    }

    #[test]
    fn area_does_not_overflow() {
        let huge = Rect::from_size((u32::MAX, 2));

        assert_eq!(huge.area(), u64::from(u32::MAX) * 2);
    }

    #[test]
    fn fits() {
        let space = Rect::new((4, 4), (20, 10));

        assert!(space.fits((20, 10)));
        assert!(space.fits((1, 1)));
        assert!(!space.fits((21, 1)));
        assert!(!space.fits((1, 11)));
    }
}
