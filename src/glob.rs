//! A globset glob paired with its compiled matcher, so that input patterns can
//! be read straight out of a project file.

use std::{
    fmt,
    path::{Component, Path, PathBuf},
};

use globset::{Glob as InnerGlob, GlobMatcher};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

pub use globset::Error;

#[derive(Debug, Clone)]
pub struct Glob {
    inner: InnerGlob,
    matcher: GlobMatcher,
}

impl Glob {
    pub fn new(glob: &str) -> Result<Self, Error> {
        let inner = InnerGlob::new(glob)?;
        let matcher = inner.compile_matcher();

        Ok(Glob { inner, matcher })
    }

    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> bool {
        self.matcher.is_match(path)
    }

    /// The leading part of the glob that contains no pattern syntax. Only this
    /// folder needs to be walked to find every match.
    pub fn search_root(&self) -> PathBuf {
        literal_prefix(Path::new(self.inner.glob()))
    }
}

impl PartialEq for Glob {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Glob {}

impl Serialize for Glob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.inner.glob())
    }
}

impl<'de> Deserialize<'de> for Glob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let glob = String::deserialize(deserializer)?;

        Glob::new(&glob).map_err(D::Error::custom)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.inner.fmt(f)
    }
}

// Characters that may start pattern syntax. Escaped literals like `[*]` are
// treated as patterns too, which only makes the search root shallower.
//
// Glob syntax described here: https://docs.rs/globset/0.4.4/globset/#syntax
const PATTERN_CHARACTERS: &[char] = &['*', '?', '{', '}', '[', ']'];

fn literal_prefix(glob_path: &Path) -> PathBuf {
    glob_path
        .components()
        .take_while(|component| match component {
            Component::Normal(part) => !part.to_string_lossy().contains(PATTERN_CHARACTERS),
            _ => true,
        })
        .collect()
}
