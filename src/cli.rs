//! Command-line interface definitions for News Fetcher.
//!
//! Secrets and endpoints can also come from environment variables or the
//! YAML file named by `--config`; see [`crate::config`].

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for News Fetcher.
///
/// # Examples
///
/// ```sh
/// # Five newest English articles about Tesla
/// news_fetcher tesla
///
/// # Twenty articles from the last week, saved to a chosen file
/// news_fetcher bitcoin -n 20 -d 7 -o bitcoin.json
///
/// # Key from the environment, snapshots collected in one directory
/// NEWSAPI_KEY=... news_fetcher banking --output-dir ./snapshots
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search term, e.g. "Tesla" or "interest rates"
    pub query: String,

    /// Number of articles to request (NewsAPI caps a page at 100)
    #[arg(short = 'n', long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub count: u32,

    /// Only include articles published in the last N days (at most 100 years)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=36500))]
    pub days: Option<u32>,

    /// NewsAPI key; prompted for when not given here, in the env, or in the config file
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Write the snapshot to this file instead of a timestamped name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for timestamped snapshot files
    #[arg(long, env = "NEWS_FETCHER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the search endpoint
    #[arg(long, env = "NEWSAPI_BASE_URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Print the results without saving them
    #[arg(long)]
    pub no_save: bool,
}
