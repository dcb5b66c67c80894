//! Item operation: fetch one URL and return its body as text.
//!
//! Uses the curl crate (libcurl) on tokio's blocking pool.

use std::time::Duration;

use super::error::FetchError;
use crate::runner::ItemOperation;

/// Maximum redirects followed per request.
const MAX_REDIRECTS: u32 = 10;

/// HTTP GET with connect and total timeouts.
#[derive(Debug, Clone, Copy)]
pub struct UrlFetch {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for UrlFetch {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ItemOperation<String> for UrlFetch {
    type Output = String;
    type Error = FetchError;

    async fn run(&self, url: String) -> Result<String, FetchError> {
        let parsed = validate_url(&url)?;
        let opts = *self;
        tokio::task::spawn_blocking(move || fetch_text(parsed.as_str(), opts))
            .await
            .map_err(|e| FetchError::Join(e.to_string()))?
    }
}

/// Parse `url` and accept only http and https.
pub fn validate_url(url: &str) -> Result<url::Url, FetchError> {
    let parsed = url::Url::parse(url.trim())?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// Performs the GET and returns the body (lossy UTF-8) on a 2xx response.
///
/// Follows redirects. Runs in the current thread; call from `spawn_blocking`
/// if used from async code.
pub fn fetch_text(url: &str, opts: UrlFetch) -> Result<String, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    tracing::debug!(url, bytes = body.len(), "fetched");
    Ok(String::from_utf8_lossy(&body).into_owned())
}
