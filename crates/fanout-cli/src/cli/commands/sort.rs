//! `fanout sort <source> <output>` – copy files into per-extension folders.

use anyhow::Result;
use fanout_core::sorter::{self, CollisionPolicy, SortOptions, SortSummary};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SortArgs {
    pub source: PathBuf,
    pub output: PathBuf,
    pub max_tasks: usize,
    pub on_conflict: CollisionPolicy,
    pub strict: bool,
}

fn print_summary(summary: &SortSummary) {
    println!(
        "Sorted {} file(s) in {:.2}s: {} copied, {} skipped, {} unchanged, {} superseded, {} failed (peak {} in flight)",
        summary.report.len(),
        summary.report.elapsed.as_secs_f64(),
        summary.copied(),
        summary.skipped(),
        summary.unchanged(),
        summary.superseded(),
        summary.failed(),
        summary.report.peak_in_flight
    );
    if summary.failed() > 0 {
        println!("Failed:");
        for (file, err) in summary.report.failures() {
            println!("  {}  {}", file, err);
        }
    }
    if !summary.walk_errors.is_empty() {
        println!("Unreadable entries skipped:");
        for err in &summary.walk_errors {
            println!("  {}", err);
        }
    }
}

pub async fn run_sort(args: &SortArgs) -> Result<()> {
    let opts = SortOptions {
        max_tasks: args.max_tasks,
        on_conflict: args.on_conflict,
    };
    let summary = sorter::sort_folder(&args.source, &args.output, &opts).await?;
    print_summary(&summary);

    if args.strict && summary.failed() > 0 {
        anyhow::bail!("{} file(s) failed to copy", summary.failed());
    }
    Ok(())
}
