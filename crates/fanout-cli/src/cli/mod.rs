//! CLI for fanout.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fanout_core::config;
use fanout_core::sorter::CollisionPolicy;
use std::path::PathBuf;

use commands::{run_sort, run_words, SortArgs, WordsArgs};

/// Top-level CLI for fanout.
#[derive(Debug, Parser)]
#[command(name = "fanout")]
#[command(about = "fanout: bounded-concurrency file sorter and word-frequency analyzer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy files from a folder into per-extension subfolders.
    Sort {
        /// Folder to read files from (walked recursively).
        source_folder: PathBuf,
        /// Folder to create `<extension>/` subfolders in.
        output_folder: PathBuf,
        /// Maximum number of parallel copies (default 5).
        #[arg(long, value_name = "N")]
        max_tasks: Option<usize>,
        /// What to do when a destination file exists: overwrite, skip or rename.
        #[arg(long, value_name = "POLICY")]
        on_conflict: Option<CollisionPolicy>,
        /// Exit nonzero if any file fails to copy.
        #[arg(long)]
        strict: bool,
    },

    /// Fetch URLs and chart the most frequent words.
    Words {
        /// One or more HTTP/HTTPS URLs to fetch.
        #[arg(required = true)]
        urls: Vec<String>,
        /// Maximum number of concurrent requests (default 5).
        #[arg(long, value_name = "N")]
        max_workers: Option<usize>,
        /// Number of words to chart (default 10).
        #[arg(long, value_name = "N")]
        top: Option<usize>,
        /// Per-request timeout in seconds (default 10).
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Comma-separated stop words replacing the built-in list.
        #[arg(long, value_delimiter = ',', value_name = "WORDS")]
        stop_words: Option<Vec<String>>,
        /// Exit nonzero if any URL fails to fetch.
        #[arg(long)]
        strict: bool,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init().context("load config")?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Sort {
                source_folder,
                output_folder,
                max_tasks,
                on_conflict,
                strict,
            } => {
                let args = SortArgs {
                    source: source_folder,
                    output: output_folder,
                    max_tasks: max_tasks.unwrap_or(cfg.max_tasks),
                    on_conflict: on_conflict.unwrap_or(cfg.on_conflict),
                    strict: strict || cfg.fail_on_item_error,
                };
                run_sort(&args).await?
            }
            CliCommand::Words {
                urls,
                max_workers,
                top,
                timeout_secs,
                stop_words,
                strict,
            } => {
                let mut cfg = cfg;
                if let Some(words) = stop_words {
                    cfg.stop_words = Some(words);
                }
                if let Some(secs) = timeout_secs {
                    cfg.fetch_timeout_secs = secs;
                }
                let args = WordsArgs {
                    urls,
                    max_workers: max_workers.unwrap_or(cfg.max_workers),
                    top_n: top.unwrap_or(cfg.top_n),
                    strict: strict || cfg.fail_on_item_error,
                };
                run_words(&args, &cfg).await?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
