//! Icon asset loading

use super::Icon;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Load an icon asset, falling back to the default icon
///
/// A missing or unreadable asset never fails tool construction.
#[must_use]
pub fn load_icon(path: &Path) -> Icon {
    match fs::read(path) {
        Ok(bytes) => Icon::Asset {
            name: path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned()),
            bytes: bytes.into(),
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load icon, using default");
            Icon::Default
        }
    }
}
