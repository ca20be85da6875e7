//! # News Fetcher
//!
//! Searches NewsAPI for a topic, drops incomplete or withdrawn articles,
//! prints what is left and saves it as a timestamped JSON snapshot.
//!
//! ## Usage
//!
//! ```sh
//! NEWSAPI_KEY=... news_fetcher tesla -n 10 -d 7
//! ```
//!
//! ## Architecture
//!
//! One linear pass, each stage awaited in turn:
//! 1. **Settings**: CLI flags merged over an optional YAML file
//! 2. **Fetching**: One GET against the search endpoint
//! 3. **Validation**: Articles missing required fields are filtered out
//! 4. **Output**: Summary on stdout, JSON snapshot on disk
//!
//! Failures after start-up are logged and the run carries on; a failed
//! search prints "No articles found." and a failed write leaves no file.

use clap::Parser;
use std::error::Error;
use std::io;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod utils;
mod validate;

use api::NewsApiClient;
use cli::Cli;
use config::{FileConfig, Settings, load_file_config};
use error::ConfigError;
use models::FetchRequest;
use outputs::{json, summary};
use utils::prompt_api_key;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr, so stdout carries only the summary) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_fetcher starting up");

    let args = Cli::parse();
    debug!(query = %args.query, count = args.count, days = ?args.days, "Parsed CLI arguments");

    // ---- Settings ----
    let file_config = match &args.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config)?;
    debug!(?settings, "Resolved settings");

    let api_key = match settings.api_key.clone() {
        Some(key) => key,
        None => {
            let stdin = io::stdin();
            prompt_api_key(&mut stdin.lock(), &mut io::stderr())?.ok_or(ConfigError::MissingApiKey)?
        }
    };

    // ---- Fetch ----
    let client = NewsApiClient::new(&settings, api_key)?;
    let request = FetchRequest {
        query: args.query.clone(),
        count: args.count,
        since_days: args.days,
    };
    let articles = client.fetch(&request).await;

    // ---- Output ----
    if articles.is_empty() {
        warn!(query = %request.query, "No articles to show");
        println!("No articles found.");
    } else {
        print!("{}", summary::render_summary(&articles));

        if args.no_save {
            info!("Skipping snapshot (--no-save)");
        } else {
            match json::save_articles(
                &articles,
                &request.query,
                args.output.as_deref(),
                &settings.output_dir,
            )
            .await
            {
                Ok(path) => println!("\nArticles saved to {}", path.display()),
                Err(e) => error!(error = %e, "Failed to save articles"),
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = articles.len(),
        "Execution complete"
    );

    Ok(())
}
