//! `fanout words <url>...` – chart the most frequent words across URLs.

use anyhow::Result;
use fanout_core::analyzer::{self, AnalyzeError, AnalyzeOptions, FailedFetch, UrlFetch};
use fanout_core::config::FanoutConfig;

#[derive(Debug, Clone)]
pub struct WordsArgs {
    pub urls: Vec<String>,
    pub max_workers: usize,
    pub top_n: usize,
    pub strict: bool,
}

fn print_failures(failures: &[FailedFetch]) {
    if failures.is_empty() {
        return;
    }
    println!("Failed URLs:");
    for f in failures {
        println!("  {}  {}", f.url, f.error);
    }
}

pub async fn run_words(args: &WordsArgs, cfg: &FanoutConfig) -> Result<()> {
    let opts = AnalyzeOptions {
        max_workers: args.max_workers,
        top_n: args.top_n,
        fetch: UrlFetch {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.fetch_timeout(),
        },
        stop_words: cfg.stop_words(),
    };

    let analysis = match analyzer::analyze(args.urls.clone(), &opts).await {
        Ok(a) => a,
        Err(e) => {
            if let AnalyzeError::NothingFetched { failures }
            | AnalyzeError::NoWords { failures, .. } = &e
            {
                print_failures(failures);
            }
            return Err(e.into());
        }
    };

    print!("{}", analysis.chart());
    println!(
        "{} of {} URL(s) fetched in {:.2}s, {} words counted ({} distinct)",
        analysis.fetched,
        args.urls.len(),
        analysis.elapsed.as_secs_f64(),
        analysis.counts.total(),
        analysis.counts.len()
    );
    print_failures(&analysis.failures);

    if args.strict && !analysis.failures.is_empty() {
        anyhow::bail!("{} URL(s) failed to fetch", analysis.failures.len());
    }
    Ok(())
}
