/// Options fixed when an [`Atlas`][crate::Atlas] is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtlasConfig {
    pub(crate) allow_growth: bool,
    pub(crate) insert_flipped: bool,
}

impl AtlasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the atlas should grow when an item doesn't fit, instead of
    /// failing the insert.
    pub fn allow_growth(self, allow_growth: bool) -> Self {
        Self {
            allow_growth,
            ..self
        }
    }

    /// Whether pixel rows of each item should be mirrored vertically when
    /// they're copied into the atlas. This only affects pixels, not placement.
    pub fn insert_flipped(self, insert_flipped: bool) -> Self {
        Self {
            insert_flipped,
            ..self
        }
    }
}
