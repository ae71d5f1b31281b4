use std::{
    collections::BTreeMap,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use fs_err as fs;
use guillotine::{AliasAtlas, Rect};
use serde::{Deserialize, Serialize};

use crate::sprite_name::SpriteName;

/// Describes where every sprite ended up in a packed atlas image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AtlasManifest {
    /// The atlas image this manifest describes.
    pub image: PathBuf,

    /// The final size of the atlas, after any growth.
    pub size: (u32, u32),

    pub sprites: BTreeMap<SpriteName, SpriteSlice>,
}

/// The portion of the atlas containing one sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSlice {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<Rect> for SpriteSlice {
    fn from(rect: Rect) -> Self {
        SpriteSlice {
            x: rect.pos().0,
            y: rect.pos().1,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl AtlasManifest {
    pub fn from_atlas(image: PathBuf, atlas: &AliasAtlas<SpriteName>) -> Self {
        let sprites = atlas
            .placements()
            .map(|(name, rect)| (name.clone(), SpriteSlice::from(rect)))
            .collect();

        Self {
            image,
            size: atlas.bounds().size(),
            sprites,
        }
    }

    pub fn write_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let mut file = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut file, self)?;
        file.flush()?;

        log::trace!("Saved manifest to {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use guillotine::{AtlasConfig, Image};

    #[test]
    fn serializes_every_sprite() {
        let mut atlas = AliasAtlas::new(32, 32, AtlasConfig::new());
        let name = SpriteName::from_paths(Path::new("root"), Path::new("root/a.png"));
        atlas.insert(name, &Image::new_empty_rgba8((8, 4))).unwrap();

        let manifest = AtlasManifest::from_atlas(PathBuf::from("atlas.png"), &atlas);
        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "image": "atlas.png",
                "size": [32, 32],
                "sprites": {
                    "a.png": { "x": 0, "y": 0, "width": 8, "height": 4 }
                }
            })
        );
    }
}
