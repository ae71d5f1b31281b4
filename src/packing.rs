//! The packing pipeline shared by every command: find images, decode them,
//! pack them into an atlas and write the results out.

use std::{
    collections::BTreeMap,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use fs_err as fs;
use guillotine::{AliasAtlas, AtlasConfig, Image};
use walkdir::WalkDir;

use crate::{
    config::{Config, PackMode},
    image_io::{self, ImageError},
    manifest::AtlasManifest,
    sprite_name::SpriteName,
};

/// Everything that controls one packing run, merged from a project file and
/// the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSettings {
    pub size: (u32, u32),
    pub allow_growth: bool,
    pub insert_flipped: bool,
    pub mode: PackMode,
    pub optimize: bool,
}

impl PackSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            size: config.size,
            allow_growth: config.allow_growth,
            insert_flipped: config.insert_flipped,
            mode: config.mode,
            optimize: config.optimize,
        }
    }

    fn atlas_config(&self) -> AtlasConfig {
        AtlasConfig::new()
            .allow_growth(self.allow_growth)
            .insert_flipped(self.insert_flipped)
    }
}

/// An image file that should end up in the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteInput {
    pub name: SpriteName,
    pub path: PathBuf,
}

/// Finds every file matched by the project's input globs, ordered by name.
pub fn discover_inputs(config: &Config) -> anyhow::Result<Vec<SpriteInput>> {
    let root = config.folder();
    let output_path = root.join(&config.output);

    let mut found: BTreeMap<SpriteName, PathBuf> = BTreeMap::new();

    for input in &config.inputs {
        let base_path = root.join(input.glob.search_root());

        if !base_path.exists() {
            log::warn!(
                "Input folder {} does not exist, skipping '{}'",
                base_path.display(),
                input.glob
            );
            continue;
        }

        log::trace!(
            "Searching for inputs in '{}' matching '{}'",
            base_path.display(),
            input.glob,
        );

        for entry in WalkDir::new(&base_path) {
            let entry = entry?;
            let path = entry.path();

            // A previous run's atlas usually matches the same globs as its
            // inputs.
            if !entry.file_type().is_file() || path == output_path {
                continue;
            }

            let matches = match path.strip_prefix(root) {
                Ok(relative) => input.glob.is_match(relative),
                Err(_) => false,
            };

            if !matches {
                continue;
            }

            let name = SpriteName::from_paths(root, path);
            log::trace!("Found input {}", name);

            if let Some(existing) = found.insert(name, path.to_owned()) {
                bail!(
                    "Path {} was described by more than one input glob",
                    existing.display()
                );
            }
        }
    }

    Ok(found
        .into_iter()
        .map(|(name, path)| SpriteInput { name, path })
        .collect())
}

/// Names each of the given files, relative to `root` where possible.
pub fn inputs_from_paths(root: &Path, paths: &[PathBuf]) -> anyhow::Result<Vec<SpriteInput>> {
    let mut inputs = Vec::with_capacity(paths.len());
    let mut seen = BTreeMap::new();

    for path in paths {
        let path = root.join(path);
        let name = SpriteName::from_paths(root, &path);

        if let Some(previous) = seen.insert(name.clone(), path.clone()) {
            bail!(
                "{} and {} would both be named '{}' in the manifest",
                previous.display(),
                path.display(),
                name
            );
        }

        inputs.push(SpriteInput { name, path });
    }

    Ok(inputs)
}

/// Decodes every input. Images in formats we can't pack are skipped with a
/// warning; anything else that goes wrong is an error.
pub fn load_sprites(inputs: &[SpriteInput]) -> anyhow::Result<Vec<(SpriteName, Image)>> {
    let mut sprites = Vec::with_capacity(inputs.len());

    for input in inputs {
        let contents = fs::read(&input.path)?;

        match image_io::decode_png(contents.as_slice()) {
            Ok(image) => {
                log::trace!(
                    "Loaded {} ({}x{})",
                    input.name,
                    image.size().0,
                    image.size().1
                );
                sprites.push((input.name.clone(), image));
            }
            Err(err @ ImageError::Unsupported { .. }) => {
                log::warn!("Skipping {}: {}", input.path.display(), err);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Could not decode {}", input.path.display()));
            }
        }
    }

    Ok(sprites)
}

/// Packs `sprites` into a new atlas according to `settings`.
pub fn build_atlas(
    settings: &PackSettings,
    sprites: Vec<(SpriteName, Image)>,
) -> Result<AliasAtlas<SpriteName>, guillotine::Error> {
    let (width, height) = settings.size;
    let mut atlas = AliasAtlas::new(width, height, settings.atlas_config());

    match settings.mode {
        PackMode::Batch => {
            for (name, image) in sprites {
                atlas.enqueue(name, image)?;
            }

            atlas.pack()?;
        }
        PackMode::Immediate => {
            for (name, image) in &sprites {
                atlas.insert(name.clone(), image)?;
            }
        }
    }

    if settings.optimize {
        atlas.optimize()?;
    }

    log::info!(
        "Packed {} sprites into a {}x{} atlas",
        atlas.len(),
        atlas.bounds().width(),
        atlas.bounds().height()
    );

    Ok(atlas)
}

/// Writes the atlas image to `image_path` and its manifest to
/// `manifest_path`, creating folders as needed.
pub fn write_atlas(
    atlas: &AliasAtlas<SpriteName>,
    image_path: &Path,
    manifest_path: &Path,
) -> anyhow::Result<()> {
    for path in &[image_path, manifest_path] {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = BufWriter::new(fs::File::create(image_path)?);
    image_io::encode_png(atlas.image(), file)
        .with_context(|| format!("Could not write {}", image_path.display()))?;

    log::info!("Wrote atlas to {}", image_path.display());

    // Point at the image relative to the manifest when they share a folder.
    let image_reference = match (image_path.parent(), image_path.file_name()) {
        (Some(parent), Some(file_name)) if Some(parent) == manifest_path.parent() => {
            PathBuf::from(file_name)
        }
        _ => image_path.to_owned(),
    };

    AtlasManifest::from_atlas(image_reference, atlas).write_to_file(manifest_path)?;

    log::info!("Wrote manifest to {}", manifest_path.display());

    Ok(())
}
