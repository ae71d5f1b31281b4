use crate::geometry::Rect;

/// The set of free rectangles on an atlas, kept sorted by ascending area.
///
/// The list only ever holds as many entries as there are fragments of free
/// space, so a linear scan and a re-sort after every change are cheap enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FreeList {
    spaces: Vec<Rect>,
}

impl FreeList {
    /// A free list covering the whole of `bounds`.
    pub fn new(bounds: Rect) -> Self {
        let mut list = Self { spaces: Vec::new() };
        list.extend(Some(bounds));
        list
    }

    /// Finds the first free rectangle, in ascending order of area, that can
    /// hold an item of the given size.
    pub fn find(&self, size: (u32, u32)) -> Option<usize> {
        self.spaces.iter().position(|space| space.fits(size))
    }

    pub fn get(&self, index: usize) -> Rect {
        self.spaces[index]
    }

    pub fn remove(&mut self, index: usize) -> Rect {
        self.spaces.remove(index)
    }

    /// Adds new free rectangles and restores the ordering. The sort is stable,
    /// so rectangles of equal area keep the order they were added in. Empty
    /// rectangles are dropped.
    pub fn extend<I: IntoIterator<Item = Rect>>(&mut self, spaces: I) {
        self.spaces
            .extend(spaces.into_iter().filter(|space| !space.is_empty()));
        self.spaces.sort_by_key(Rect::area);
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.spaces
    }

    pub fn total_area(&self) -> u64 {
        self.spaces.iter().map(Rect::area).sum()
    }
}
