use std::{fmt, path::PathBuf, str::FromStr};

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Packs images into a single growable texture atlas")]
pub struct Options {
    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack the images described by a texpack.toml project into an atlas image
    /// and a JSON manifest.
    Pack(PackOptions),

    /// Pack an explicit list of PNG images into an atlas, without a project
    /// file.
    PackImages(PackImagesOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The path to a texpack.toml file, or a folder containing one. Defaults
    /// to the current working directory.
    #[structopt(long)]
    pub config: Option<PathBuf>,

    /// Overrides the initial atlas size from the project, as WIDTHxHEIGHT.
    #[structopt(long)]
    pub size: Option<Size>,

    /// Grow the atlas when images don't fit, even if the project disables it.
    #[structopt(long)]
    pub allow_growth: bool,

    /// Re-pack every image once after packing to reduce fragmentation.
    #[structopt(long)]
    pub optimize: bool,
}

#[derive(Debug, StructOpt)]
pub struct PackImagesOptions {
    /// The PNG images to pack.
    #[structopt(required = true)]
    pub paths: Vec<PathBuf>,

    /// Where to write the packed atlas image.
    #[structopt(long, short)]
    pub output: PathBuf,

    /// Where to write the JSON manifest describing where each image was
    /// placed. Defaults to the output path with a .json extension.
    #[structopt(long)]
    pub manifest: Option<PathBuf>,

    /// The initial atlas size, as WIDTHxHEIGHT.
    #[structopt(long, default_value = "256x256")]
    pub size: Size,

    /// Grow the atlas when images don't fit instead of failing.
    #[structopt(long)]
    pub allow_growth: bool,

    /// Store images upside-down in the atlas.
    #[structopt(long)]
    pub flipped: bool,

    /// Place images one at a time in the given order, instead of sorting them
    /// largest first.
    #[structopt(long)]
    pub immediate: bool,

    /// Re-pack every image once after packing to reduce fragmentation.
    #[structopt(long)]
    pub optimize: bool,
}

/// A width and height given on the command line as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(value: &str) -> Result<Size, Self::Err> {
        let invalid = || format!("Invalid size '{}'. Expected WIDTHxHEIGHT, like 512x512.", value);

        let mut parts = value.splitn(2, |c| c == 'x' || c == 'X');
        let width = parts.next().ok_or_else(invalid)?;
        let height = parts.next().ok_or_else(invalid)?;

        Ok(Size {
            width: width.trim().parse().map_err(|_| invalid())?,
            height: height.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_size() {
        assert_eq!(
            "512x256".parse::<Size>(),
            Ok(Size {
                width: 512,
                height: 256
            })
        );
        assert_eq!(
            "64X32".parse::<Size>(),
            Ok(Size {
                width: 64,
                height: 32
            })
        );
    }

    #[test]
    fn reject_bad_sizes() {
        assert!("512".parse::<Size>().is_err());
        assert!("ax4".parse::<Size>().is_err());
        assert!("4x-1".parse::<Size>().is_err());
        assert!("".parse::<Size>().is_err());
    }

    #[test]
    fn display_round_trips() {
        let size: Size = "30x40".parse().unwrap();

        assert_eq!(size.to_string(), "30x40");
    }
}
