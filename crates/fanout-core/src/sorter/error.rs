//! Error types for the file sorter.

use std::io;
use std::path::PathBuf;

use crate::config::ConfigError;

/// Failure copying one file. Recorded against that file only.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("no free destination name for {}", .0.display())]
    NoFreeName(PathBuf),
    #[error("copying {} to {}: {source}", .from.display(), .to.display())]
    Io {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

impl CopyError {
    /// Classify an I/O error from a copy between `from` and `to`.
    pub fn from_io(from: &std::path::Path, to: &std::path::Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => CopyError::NotFound(from.to_path_buf()),
            io::ErrorKind::PermissionDenied => CopyError::PermissionDenied(from.to_path_buf()),
            _ => CopyError::Io {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Fatal error for a whole sort run.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("walking source folder failed: {0}")]
    Walk(String),
}
