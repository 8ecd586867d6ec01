//! Path utilities
//!
//! Report paths always use '/' as separator so reports compare across platforms.

use std::path::{Path, PathBuf};

/// Render a path for the report, using '/' as separator
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Identity used to process each file once, even when reached twice.
///
/// Falls back to the path as given when it cannot be resolved.
pub fn dedup_key(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Extension including its leading dot, or an empty string
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
