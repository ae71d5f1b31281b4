use thiserror::Error;

use crate::{geometry::Rect, id::Id};

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while placing items on an atlas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No free rectangle can hold the item and the atlas is not allowed to
    /// grow. Retrying with growth enabled or a larger surface may succeed.
    #[error("no free space for a {}x{} item", .size.0, .size.1)]
    NoFreeSpace { size: (u32, u32) },

    /// The atlas grew to make room for the item, but it still didn't fit.
    #[error("no free space for a {}x{} item, even after growing", .size.0, .size.1)]
    NoSpaceAfterGrowth { size: (u32, u32) },

    /// The chosen free rectangle was smaller than the item. This is an
    /// internal invariant violation.
    #[error("cannot split {space:?} around an item of size {item:?}")]
    SplitFailed { item: (u32, u32), space: Rect },

    /// A previously placed item no longer fit after the atlas grew. This is an
    /// internal invariant violation; the atlas keeps its old layout.
    #[error("item {id} could not be placed again after growing")]
    GrowthReplayFailed { id: Id },

    #[error("no item with id {0}")]
    NotFound(Id),

    /// A lookup on an [`AliasAtlas`][crate::AliasAtlas] used a key that was
    /// never placed.
    #[error("no item with the given key")]
    UnknownKey,

    /// An insert used an id that is already placed. Use `replace` to change
    /// the contents of an existing item.
    #[error("an item with id {0} is already placed")]
    DuplicateId(Id),

    /// Immediate-mode operations can't be interleaved with a batch that hasn't
    /// been packed yet.
    #[error("{queued} items are queued for packing; call pack first")]
    PackPending { queued: usize },
}
