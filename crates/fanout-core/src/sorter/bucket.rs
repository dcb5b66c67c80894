//! Destination bucket (subfolder name) for a source file.

use std::path::Path;

/// Bucket for files whose name has no usable extension.
pub const NO_EXTENSION_BUCKET: &str = "no_extension";

/// Lowercased extension without the dot, or [`NO_EXTENSION_BUCKET`].
///
/// Dot-files such as `.bashrc` and names ending in `.` have no extension.
/// Only the last suffix counts: `archive.tar.gz` goes to `gz`.
pub fn bucket_for(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => ext.to_string_lossy().to_lowercase(),
        _ => NO_EXTENSION_BUCKET.to_string(),
    }
}
