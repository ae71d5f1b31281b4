use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

/// Identifies an item placed on an atlas.
///
/// Ids are chosen by the caller, or handed out by an [`IdGenerator`]. An id is
/// unique within one atlas for as long as its item is placed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u64);

impl Id {
    #[inline]
    pub const fn new(value: u64) -> Self {
        Id(value)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Hands out monotonically increasing ids, starting from zero.
///
/// `IdGenerator` is thread safe and is usually shared between several atlases
/// behind an `Arc`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next_id: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self) -> Id {
        Id(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}
