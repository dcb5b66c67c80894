//! File sorter: copy every file under a source folder into
//! `<output>/<lowercase extension>/<file name>`, a bounded number at a time.
//!
//! Pipeline: validate config → check source → create output → walk →
//! plan destinations in walk order → runner over [`FileCopy`] items.

mod bucket;
mod collision;
mod copy;
mod error;
mod plan;
mod walk;

pub use bucket::{bucket_for, NO_EXTENSION_BUCKET};
pub use collision::{numbered_name, resolve, CollisionPolicy, ParsePolicyError, Resolution};
pub use copy::{CopyAction, CopyOutcome, FileCopy};
pub use error::{CopyError, SortError};
pub use plan::{plan_copies, PlannedCopy};
pub use walk::{list_files, SourceListing};

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ConfigError;
use crate::limiter::TaskLimiter;
use crate::runner::{run_all, work_items, RunReport};

/// Parameters for one sort run.
#[derive(Debug, Clone)]
pub struct SortOptions {
    pub max_tasks: usize,
    pub on_conflict: CollisionPolicy,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            max_tasks: 5,
            on_conflict: CollisionPolicy::Overwrite,
        }
    }
}

/// Result of a sort run: one outcome per file found, plus walk problems.
#[derive(Debug)]
pub struct SortSummary {
    pub report: RunReport<CopyOutcome, CopyError>,
    pub walk_errors: Vec<String>,
}

impl SortSummary {
    fn count(&self, action: CopyAction) -> usize {
        self.report
            .successes()
            .filter(|(_, o)| o.action == action)
            .count()
    }

    pub fn copied(&self) -> usize {
        self.count(CopyAction::Copied)
    }

    pub fn skipped(&self) -> usize {
        self.count(CopyAction::Skipped)
    }

    pub fn unchanged(&self) -> usize {
        self.count(CopyAction::Unchanged)
    }

    pub fn superseded(&self) -> usize {
        self.count(CopyAction::Superseded)
    }

    pub fn failed(&self) -> usize {
        self.report.failure_count()
    }

    pub fn bytes_copied(&self) -> u64 {
        self.report.successes().map(|(_, o)| o.bytes).sum()
    }
}

/// Sort `source` into `output`. Configuration problems (bad `max_tasks`,
/// missing or unreadable source, output not creatable) fail before any copy
/// starts; per-file failures are recorded in the summary.
pub async fn sort_folder(
    source: &Path,
    output: &Path,
    opts: &SortOptions,
) -> Result<SortSummary, SortError> {
    let limiter = Arc::new(TaskLimiter::new(opts.max_tasks)?);
    check_source(source).await?;
    prepare_output(output).await?;

    let exclude = nested_output(source, output);
    if let Some(ex) = &exclude {
        tracing::debug!("output folder is inside source; excluding {}", ex.display());
    }
    let root = source.to_path_buf();
    let output_root = output.to_path_buf();
    let policy = opts.on_conflict;
    let (plans, walk_errors) = tokio::task::spawn_blocking(move || {
        let listing = list_files(&root, exclude.as_deref());
        (plan_copies(&output_root, policy, listing.files), listing.errors)
    })
    .await
    .map_err(|e| SortError::Walk(e.to_string()))?;
    tracing::info!(
        files = plans.len(),
        max_tasks = opts.max_tasks,
        policy = %opts.on_conflict,
        "sorting {} into {}",
        source.display(),
        output.display()
    );

    let items = work_items(plans, |p| p.source.display().to_string());
    let report = run_all(limiter, Arc::new(FileCopy), items).await;

    Ok(SortSummary {
        report,
        walk_errors,
    })
}

async fn check_source(source: &Path) -> Result<(), ConfigError> {
    let meta = match tokio::fs::metadata(source).await {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::SourceMissing(source.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::SourceUnreadable {
                path: source.to_path_buf(),
                source: e,
            });
        }
    };
    if !meta.is_dir() {
        return Err(ConfigError::SourceNotDirectory(source.to_path_buf()));
    }
    tokio::fs::read_dir(source)
        .await
        .map_err(|e| ConfigError::SourceUnreadable {
            path: source.to_path_buf(),
            source: e,
        })?;
    Ok(())
}

async fn prepare_output(output: &Path) -> Result<(), ConfigError> {
    if tokio::fs::metadata(output).await.map(|m| m.is_dir()).unwrap_or(false) {
        return Ok(());
    }
    tracing::info!("creating output directory: {}", output.display());
    tokio::fs::create_dir_all(output)
        .await
        .map_err(|e| ConfigError::OutputNotCreatable {
            path: output.to_path_buf(),
            source: e,
        })
}

/// If `output` lives inside `source`, the path under `source` to exclude
/// from the walk (expressed relative to `source` as given).
fn nested_output(source: &Path, output: &Path) -> Option<PathBuf> {
    let src = source.canonicalize().ok()?;
    let out = output.canonicalize().ok()?;
    let rel = out.strip_prefix(&src).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(source.join(rel))
}
