//! Bounded concurrent task runner.
//!
//! Every work item gets its own tokio task. Each task takes a permit from the
//! shared [`TaskLimiter`], runs the item operation, and releases the permit
//! when it finishes, however it finishes. The runner joins every task before
//! returning, and one item failing never cancels the others.

mod error;
mod item;
mod report;

pub use error::ItemError;
pub use item::{work_items, ItemId, WorkItem};
pub use report::{ItemOutcome, ItemResult, RunReport};

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::limiter::TaskLimiter;

/// The per-item work a run performs: copy one file, fetch one URL, ...
pub trait ItemOperation<I>: Send + Sync + 'static {
    type Output: Send + 'static;
    type Error: fmt::Display + Send + 'static;

    fn run(&self, input: I) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

/// Runs `op` over every item with at most `limiter.max_tasks()` operations in
/// flight. Returns one outcome per item, ordered by `ItemId`.
pub async fn run_all<I, O>(
    limiter: Arc<TaskLimiter>,
    op: Arc<O>,
    items: Vec<WorkItem<I>>,
) -> RunReport<O::Output, O::Error>
where
    I: Send + 'static,
    O: ItemOperation<I>,
{
    let started = Instant::now();
    let peak_before = limiter.peak();
    tracing::debug!(
        items = items.len(),
        max_tasks = limiter.max_tasks(),
        "dispatching work items"
    );

    let mut handles = Vec::with_capacity(items.len());
    for item in items {
        let WorkItem { id, label, payload } = item;
        let limiter = Arc::clone(&limiter);
        let op = Arc::clone(&op);
        let task_label = label.clone();
        let handle = tokio::spawn(async move {
            let _permit = limiter.acquire().await;
            tracing::debug!(item = %id, label = %task_label, "started");
            op.run(payload).await.map_err(ItemError::Operation)
        });
        handles.push((id, label, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (id, label, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => Err(ItemError::Panicked(join_err.to_string())),
        };
        match &result {
            Ok(_) => tracing::debug!(item = %id, label = %label, "finished"),
            Err(e) => tracing::warn!(item = %id, label = %label, "failed: {}", e),
        }
        outcomes.push(ItemOutcome { id, label, result });
    }

    let report = RunReport {
        outcomes,
        elapsed: started.elapsed(),
        peak_in_flight: limiter.peak().max(peak_before),
    };
    tracing::info!(
        total = report.len(),
        failed = report.failure_count(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "run complete"
    );
    report
}
