use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glob::Glob;

static CONFIG_FILENAME: &str = "texpack.toml";

/// A texpack project, described by a texpack.toml file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The name of the project, currently only used in logging.
    pub name: String,

    /// The size the atlas starts out at.
    #[serde(default = "default_size")]
    pub size: (u32, u32),

    /// Whether the atlas may grow past `size` when images don't fit.
    #[serde(default = "default_allow_growth")]
    pub allow_growth: bool,

    /// Whether images are stored upside-down in the atlas, for renderers that
    /// treat the bottom row as the first one.
    #[serde(default)]
    pub insert_flipped: bool,

    /// How images are fed to the packer.
    #[serde(default)]
    pub mode: PackMode,

    /// Whether to re-pack every image once more after packing.
    #[serde(default)]
    pub optimize: bool,

    /// The images to pack.
    #[serde(default)]
    pub inputs: Vec<InputConfig>,

    /// Where to write the atlas image, relative to this file.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Where to write the manifest, relative to this file.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    /// The path that this config came from.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        if meta.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_folder(path)
        }
    }

    pub fn read_from_folder<P: AsRef<Path>>(folder_path: P) -> Result<Self, ConfigError> {
        let folder_path = folder_path.as_ref();
        let file_path = &folder_path.join(CONFIG_FILENAME);

        Self::read_from_file(file_path)
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let mut config = Self::from_slice(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();

        Ok(config)
    }

    fn from_slice(contents: &[u8]) -> Result<Self, toml::de::Error> {
        toml::from_slice(contents)
    }

    /// The path that paths in this Config should be considered relative to.
    pub fn folder(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

fn default_size() -> (u32, u32) {
    (256, 256)
}

fn default_allow_growth() -> bool {
    true
}

fn default_output() -> PathBuf {
    PathBuf::from("atlas.png")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("atlas.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct InputConfig {
    /// A glob matching every image, relative to the config file, that belongs
    /// in the atlas.
    pub glob: Glob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackMode {
    /// Queue every image, then place them all at once, largest first. This
    /// usually wastes less space.
    Batch,

    /// Place images one at a time, in name order.
    Immediate,
}

impl Default for PackMode {
    fn default() -> Self {
        PackMode::Batch
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config {} is invalid", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        match self {
            ConfigError::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_slice(b"name = \"ui\"").unwrap();

        assert_eq!(config.size, (256, 256));
        assert!(config.allow_growth);
        assert!(!config.insert_flipped);
        assert_eq!(config.mode, PackMode::Batch);
        assert!(!config.optimize);
        assert!(config.inputs.is_empty());
        assert_eq!(config.output, PathBuf::from("atlas.png"));
        assert_eq!(config.manifest, PathBuf::from("atlas.json"));
    }

    #[test]
    fn full() {
        let source = r#"
            name = "game"
            size = [512, 128]
            allow-growth = false
            insert-flipped = true
            mode = "immediate"
            optimize = true
            output = "out/sheet.png"
            manifest = "out/sheet.json"

            [[inputs]]
            glob = "sprites/**/*.png"
        "#;

        let config = Config::from_slice(source.as_bytes()).unwrap();

        assert_eq!(config.size, (512, 128));
        assert!(!config.allow_growth);
        assert!(config.insert_flipped);
        assert_eq!(config.mode, PackMode::Immediate);
        assert!(config.optimize);
        assert_eq!(config.inputs.len(), 1);
        assert_eq!(config.inputs[0].glob.search_root(), PathBuf::from("sprites"));
        assert_eq!(config.output, PathBuf::from("out/sheet.png"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::from_slice(b"name = \"x\"\nspritesheets = true").is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Config::read_from_folder("this/folder/does/not/exist").unwrap_err();

        assert!(err.is_not_found());
    }
}
