use std::{
    fmt,
    path::{self, Path},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// The name a sprite is known by in the atlas manifest: the path of its source
/// image relative to the project, always using `/` as the separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteName(Arc<str>);

impl SpriteName {
    /// Names `sprite_path` relative to `root_path`. Paths outside of the root
    /// are named by their file name alone.
    pub fn from_paths(root_path: &Path, sprite_path: &Path) -> Self {
        let relative = match sprite_path.strip_prefix(root_path) {
            Ok(relative) if relative.as_os_str().len() > 0 => relative,
            _ => sprite_path
                .file_name()
                .map(Path::new)
                .unwrap_or(sprite_path),
        };

        let displayed = format!("{}", relative.display());

        // Keep names stable across platforms.
        let displayed = if path::MAIN_SEPARATOR == '/' {
            displayed
        } else {
            displayed.replace(path::MAIN_SEPARATOR, "/")
        };

        SpriteName(displayed.into())
    }
}

impl AsRef<str> for SpriteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpriteName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
