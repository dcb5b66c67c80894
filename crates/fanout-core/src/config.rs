use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::analyzer::StopWords;
use crate::sorter::CollisionPolicy;

/// Environment variable that points at an alternate config file.
pub const CONFIG_ENV: &str = "FANOUT_CONFIG";

/// Invalid run parameters, detected before any work is scheduled.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max tasks must be a positive integer, got {0}")]
    InvalidMaxTasks(usize),
    #[error("max tasks must be at most {max}, got {requested}")]
    TooManyTasks { requested: usize, max: usize },
    #[error("top N must be a positive integer, got {0}")]
    InvalidTopN(usize),
    #[error("fetch timeout must be at least one second")]
    InvalidTimeout,
    #[error("connect timeout must be at least one second")]
    InvalidConnectTimeout,
    #[error("no URLs given")]
    NoUrls,
    #[error("source folder {} does not exist", .0.display())]
    SourceMissing(PathBuf),
    #[error("source {} is not a directory", .0.display())]
    SourceNotDirectory(PathBuf),
    #[error("source folder {} is not readable: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot create output folder {}: {source}", .path.display())]
    OutputNotCreatable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Global configuration loaded from `~/.config/fanout/config.toml`.
///
/// Every field has a default, so a partial file only overrides what it names.
/// Command-line flags override these values in turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FanoutConfig {
    /// Parallel copies for `fanout sort`.
    pub max_tasks: usize,
    /// Parallel fetches for `fanout words`.
    pub max_workers: usize,
    /// Number of words shown in the chart.
    pub top_n: usize,
    /// Whole-request timeout for a fetch, in seconds.
    pub fetch_timeout_secs: u64,
    /// Connect timeout for a fetch, in seconds.
    pub connect_timeout_secs: u64,
    /// What to do when a destination file already exists.
    pub on_conflict: CollisionPolicy,
    /// Exit nonzero when any single item fails.
    pub fail_on_item_error: bool,
    /// Replaces the built-in stop-word list when set.
    pub stop_words: Option<Vec<String>>,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            max_tasks: 5,
            max_workers: 5,
            top_n: 10,
            fetch_timeout_secs: 10,
            connect_timeout_secs: 5,
            on_conflict: CollisionPolicy::Overwrite,
            fail_on_item_error: false,
            stop_words: None,
        }
    }
}

impl FanoutConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Stop words in effect: the configured list, or the built-in one.
    pub fn stop_words(&self) -> StopWords {
        match &self.stop_words {
            Some(words) => StopWords::from_words(words),
            None => StopWords::default(),
        }
    }
}

/// Config file location: `$FANOUT_CONFIG` if set, else the XDG config dir.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fanout")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FanoutConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FanoutConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FanoutConfig = toml::from_str(&data)?;
    Ok(cfg)
}
