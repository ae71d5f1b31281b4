mod pack;
mod pack_images;

pub use pack::*;
pub use pack_images::*;
