//! Error types for the word-frequency analyzer.

use crate::config::ConfigError;

/// Failure fetching one URL. Recorded against that URL only.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
    #[error("transport error: {0}")]
    Transport(#[from] curl::Error),
    #[error("HTTP {0}")]
    Http(u32),
    #[error("background task failed: {0}")]
    Join(String),
}

/// A URL that could not be fetched, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFetch {
    pub url: String,
    pub error: String,
}

/// Fatal error for a whole analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Every fetch failed; there is nothing to count.
    #[error("all {} URL(s) failed to fetch", .failures.len())]
    NothingFetched { failures: Vec<FailedFetch> },
    /// Texts were fetched but no countable words remained.
    #[error("no words left to count in {fetched} fetched text(s)")]
    NoWords {
        fetched: usize,
        failures: Vec<FailedFetch>,
    },
}
