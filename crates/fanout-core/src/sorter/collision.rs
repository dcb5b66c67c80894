//! What to do when the destination file already exists.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::CopyError;
use crate::checksum;

/// Upper bound on `_<n>` suffixes tried by [`CollisionPolicy::Rename`].
const MAX_RENAME_ATTEMPTS: u32 = 10_000;

/// Deterministic handling of an existing destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace the existing file.
    #[default]
    Overwrite,
    /// Keep the existing file and do not copy.
    Skip,
    /// Keep the existing file; reuse it if its content is identical,
    /// otherwise copy to the first free `<stem>_<n>.<ext>`.
    Rename,
}

impl CollisionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CollisionPolicy::Overwrite => "overwrite",
            CollisionPolicy::Skip => "skip",
            CollisionPolicy::Rename => "rename",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown collision policy {0:?} (expected overwrite, skip or rename)")]
pub struct ParsePolicyError(String);

impl FromStr for CollisionPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "skip" => Ok(CollisionPolicy::Skip),
            "rename" => Ok(CollisionPolicy::Rename),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Where (and whether) to write a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Copy to this path (it may exist and be replaced).
    Write(PathBuf),
    /// Destination exists; leave it alone.
    Skip(PathBuf),
    /// This path already holds identical content.
    Unchanged(PathBuf),
    /// A later file in the same run overwrites this path; do not copy.
    Superseded(PathBuf),
}

impl Resolution {
    pub fn path(&self) -> &Path {
        match self {
            Resolution::Write(p)
            | Resolution::Skip(p)
            | Resolution::Unchanged(p)
            | Resolution::Superseded(p) => p,
        }
    }
}

/// `<stem>_<n>.<ext>` next to `dest`, or `<name>_<n>` without an extension.
pub fn numbered_name(dest: &Path, n: u32) -> PathBuf {
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match dest.extension() {
        Some(ext) if !ext.is_empty() => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        _ => format!("{}_{}", stem, n),
    };
    dest.with_file_name(name)
}

/// Decide the destination for `source` given the preferred path `dest`.
///
/// `claimed` holds destinations already taken earlier in this run; the
/// caller adds the returned path to it. Blocking (may hash both files).
pub fn resolve(
    policy: CollisionPolicy,
    source: &Path,
    dest: &Path,
    claimed: &HashSet<PathBuf>,
) -> Result<Resolution, CopyError> {
    match policy {
        CollisionPolicy::Overwrite => Ok(Resolution::Write(dest.to_path_buf())),
        CollisionPolicy::Skip => {
            if claimed.contains(dest) || exists(dest)? {
                Ok(Resolution::Skip(dest.to_path_buf()))
            } else {
                Ok(Resolution::Write(dest.to_path_buf()))
            }
        }
        CollisionPolicy::Rename => {
            let mut candidate = dest.to_path_buf();
            for n in 1..=MAX_RENAME_ATTEMPTS {
                if !claimed.contains(&candidate) {
                    if !exists(&candidate)? {
                        return Ok(Resolution::Write(candidate));
                    }
                    if checksum::same_content(source, &candidate)
                        .map_err(|e| CopyError::from_io(source, &candidate, e))?
                    {
                        return Ok(Resolution::Unchanged(candidate));
                    }
                }
                candidate = numbered_name(dest, n);
            }
            Err(CopyError::NoFreeName(dest.to_path_buf()))
        }
    }
}

fn exists(path: &Path) -> Result<bool, CopyError> {
    path.try_exists().map_err(|e| CopyError::from_io(path, path, e))
}
