//! Word-frequency analyzer: fetch URLs concurrently, then count words in a
//! single pass once every fetch has finished.

mod chart;
mod error;
mod fetch;
mod stop_words;
mod words;

pub use chart::{render_bar_chart, DEFAULT_BAR_WIDTH};
pub use error::{AnalyzeError, FailedFetch, FetchError};
pub use fetch::{fetch_text, validate_url, UrlFetch};
pub use stop_words::{StopWords, DEFAULT_STOP_WORDS};
pub use words::{count_words, tokenize, WordCounts};

use std::sync::Arc;
use std::time::Duration;

use crate::config::ConfigError;
use crate::limiter::TaskLimiter;
use crate::runner::{run_all, work_items, ItemOperation};

/// Parameters for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub max_workers: usize,
    pub top_n: usize,
    pub fetch: UrlFetch,
    pub stop_words: StopWords,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            max_workers: 5,
            top_n: 10,
            fetch: UrlFetch::default(),
            stop_words: StopWords::default(),
        }
    }
}

/// Outcome of a run that produced at least one countable word.
#[derive(Debug)]
pub struct Analysis {
    pub counts: WordCounts,
    /// Top `top_n` words, highest count first.
    pub top: Vec<(String, u64)>,
    /// Number of URLs fetched successfully.
    pub fetched: usize,
    /// URLs that failed, in input order.
    pub failures: Vec<FailedFetch>,
    pub elapsed: Duration,
    pub peak_in_flight: usize,
}

impl Analysis {
    /// Bar chart of `top`.
    pub fn chart(&self) -> String {
        let title = format!("Top {} Words by Frequency", self.top.len());
        render_bar_chart(&title, &self.top, DEFAULT_BAR_WIDTH)
    }
}

/// Fetch `urls` over HTTP and count their words.
pub async fn analyze(urls: Vec<String>, opts: &AnalyzeOptions) -> Result<Analysis, AnalyzeError> {
    if opts.fetch.timeout.is_zero() {
        return Err(ConfigError::InvalidTimeout.into());
    }
    // libcurl reads a zero connect timeout as its 300 s default.
    if opts.fetch.connect_timeout.is_zero() {
        return Err(ConfigError::InvalidConnectTimeout.into());
    }
    analyze_with(Arc::new(opts.fetch), urls, opts).await
}

/// Like [`analyze`] with a caller-supplied fetch operation.
pub async fn analyze_with<O>(
    fetcher: Arc<O>,
    urls: Vec<String>,
    opts: &AnalyzeOptions,
) -> Result<Analysis, AnalyzeError>
where
    O: ItemOperation<String, Output = String>,
{
    let limiter = Arc::new(TaskLimiter::new(opts.max_workers)?);
    if opts.top_n == 0 {
        return Err(ConfigError::InvalidTopN(0).into());
    }
    if urls.is_empty() {
        return Err(ConfigError::NoUrls.into());
    }
    if opts.stop_words.is_empty() {
        tracing::debug!("no stop words; every token is counted");
    }
    tracing::info!(
        urls = urls.len(),
        max_workers = opts.max_workers,
        stop_words = opts.stop_words.len(),
        "fetching"
    );

    let items = work_items(urls, |u| u.clone());
    let report = run_all(limiter, fetcher, items).await;

    let failures: Vec<FailedFetch> = report
        .failures()
        .map(|(url, err)| FailedFetch {
            url: url.to_string(),
            error: err.to_string(),
        })
        .collect();
    let fetched = report.success_count();
    if fetched == 0 {
        return Err(AnalyzeError::NothingFetched { failures });
    }

    // Sequential pass over the joined results, in input order.
    let counts = count_words(report.successes().map(|(_, text)| text.as_str()), &opts.stop_words);
    if counts.is_empty() {
        return Err(AnalyzeError::NoWords { fetched, failures });
    }
    let top = counts.top(opts.top_n);
    tracing::info!(
        fetched,
        failed = failures.len(),
        distinct = counts.len(),
        "word count complete"
    );

    Ok(Analysis {
        counts,
        top,
        fetched,
        failures,
        elapsed: report.elapsed,
        peak_in_flight: report.peak_in_flight,
    })
}
