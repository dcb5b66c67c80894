//! Item operation: carry out one planned copy.

use std::path::{Path, PathBuf};

use super::collision::Resolution;
use super::error::CopyError;
use super::plan::PlannedCopy;
use crate::runner::ItemOperation;

/// Prefix of in-progress copies inside a bucket directory.
const TEMP_PREFIX: &str = ".fanout-";

/// What happened to a file that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAction {
    Copied,
    /// Destination existed and the policy said to keep it.
    Skipped,
    /// Destination already held identical content.
    Unchanged,
    /// A later file of the same name in this run took the destination.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct CopyOutcome {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub action: CopyAction,
    /// Bytes written (0 unless `Copied`).
    pub bytes: u64,
}

/// Copies a source file to its planned destination.
///
/// The bytes go to a temporary file in the bucket directory, which is then
/// renamed over the destination, so a destination is never seen half
/// written.
#[derive(Debug, Default)]
pub struct FileCopy;

impl FileCopy {
    async fn ensure_bucket(bucket_dir: &Path) -> Result<(), CopyError> {
        if tokio::fs::try_exists(bucket_dir).await.unwrap_or(false) {
            return Ok(());
        }
        tracing::info!("creating directory: {}", bucket_dir.display());
        // create_dir_all tolerates another task creating it first.
        tokio::fs::create_dir_all(bucket_dir)
            .await
            .map_err(|source| CopyError::CreateDir {
                path: bucket_dir.to_path_buf(),
                source,
            })
    }

    async fn copy_into_place(
        source: &Path,
        bucket_dir: &Path,
        target: &Path,
    ) -> Result<u64, CopyError> {
        let tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .tempfile_in(bucket_dir)
            .map_err(|e| CopyError::Io {
                from: source.to_path_buf(),
                to: bucket_dir.to_path_buf(),
                source: e,
            })?;
        let bytes = tokio::fs::copy(source, tmp.path())
            .await
            .map_err(|e| CopyError::from_io(source, target, e))?;
        tmp.persist(target)
            .map_err(|e| CopyError::from_io(source, target, e.error))?;
        Ok(bytes)
    }
}

impl ItemOperation<PlannedCopy> for FileCopy {
    type Output = CopyOutcome;
    type Error = CopyError;

    async fn run(&self, planned: PlannedCopy) -> Result<CopyOutcome, CopyError> {
        let PlannedCopy {
            source,
            bucket_dir,
            resolution,
        } = planned;
        let resolution = resolution?;
        let destination = resolution.path().to_path_buf();

        let (action, bytes) = match resolution {
            Resolution::Write(_) => {
                Self::ensure_bucket(&bucket_dir).await?;
                tracing::info!("copying {} to {}", source.display(), destination.display());
                let bytes = Self::copy_into_place(&source, &bucket_dir, &destination).await?;
                (CopyAction::Copied, bytes)
            }
            Resolution::Skip(_) => {
                tracing::debug!("{} exists, skipping {}", destination.display(), source.display());
                (CopyAction::Skipped, 0)
            }
            Resolution::Unchanged(_) => {
                tracing::debug!("{} already up to date", destination.display());
                (CopyAction::Unchanged, 0)
            }
            Resolution::Superseded(_) => {
                tracing::debug!(
                    "{} is replaced later in this run, not copying {}",
                    destination.display(),
                    source.display()
                );
                (CopyAction::Superseded, 0)
            }
        };

        Ok(CopyOutcome {
            source,
            destination,
            action,
            bytes,
        })
    }
}
