//! Guillotine is a small library for packing images into a single texture
//! atlas that can grow as it fills up.
//!
//! Every placement takes the smallest free rectangle that can hold an item,
//! puts the item in its corner, and splits the leftover space with one
//! straight cut into at most two new free rectangles. When nothing fits, the
//! atlas can optionally grow and lay out everything again.
//!
//! Items are placed either one at a time with [`Atlas::insert`], or queued
//! with [`Atlas::enqueue`] and placed largest-first by [`Atlas::pack`].
//! [`Atlas::optimize`] re-packs every item to undo fragmentation, and
//! [`AliasAtlas`] lets callers address items by their own keys.
//!
//! ## Example
//! ```
//! use guillotine::{Atlas, AtlasConfig, Id, Image};
//!
//! let config = AtlasConfig::new().allow_growth(true);
//! let mut atlas = Atlas::new(128, 128, config);
//!
//! atlas.insert(Id::new(1), &Image::new_empty_rgba8((64, 32)))?;
//! atlas.insert(Id::new(2), &Image::new_empty_rgba8((200, 16)))?;
//!
//! assert_eq!(atlas.bounds_of(Id::new(2))?.size(), (200, 16));
//! assert!(atlas.bounds().width() >= 200);
//! # Ok::<(), guillotine::Error>(())
//! ```

mod alias;
mod atlas;
mod config;
mod error;
mod free_list;
mod geometry;
mod id;
mod image;
mod split;

pub use alias::*;
pub use atlas::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use id::*;
pub use image::*;
