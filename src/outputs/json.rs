//! JSON snapshot output.
//!
//! Each run writes one pretty-printed document:
//!
//! ```json
//! {
//!   "timestamp": "2025-01-15T09:30:05+01:00",
//!   "query": "tesla",
//!   "num_articles": 2,
//!   "articles": [ ... ]
//! }
//! ```
//!
//! Without an explicit filename the snapshot is named after the local time,
//! e.g. `{output_dir}/20250115_093005.json`.

use crate::error::PersistError;
use crate::models::{Article, SavedArticles};
use crate::utils::{iso_timestamp, timestamped_filename};
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Write `articles` to a JSON snapshot.
///
/// # Arguments
///
/// * `articles` - Validated articles, written in the given order
/// * `query` - The search term; recorded as `"unknown"` when empty
/// * `filename` - Explicit destination; if `None`, a timestamped name under `output_dir`
/// * `output_dir` - Directory for generated filenames
///
/// # Returns
///
/// The path that was written.
///
/// # Errors
///
/// [`PersistError`] if serialization, directory creation or the write fails.
/// Callers are expected to log it and carry on.
#[instrument(level = "info", skip(articles), fields(count = articles.len()))]
pub async fn save_articles(
    articles: &[Article],
    query: &str,
    filename: Option<&Path>,
    output_dir: &Path,
) -> Result<PathBuf, PersistError> {
    let now = Local::now();
    let path = match filename {
        Some(f) => f.to_path_buf(),
        None => output_dir.join(timestamped_filename(&now)),
    };

    let snapshot = SavedArticles {
        timestamp: iso_timestamp(&now),
        query: if query.is_empty() {
            "unknown".to_string()
        } else {
            query.to_string()
        },
        num_articles: articles.len(),
        articles: articles.to_vec(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| PersistError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(&path, json)
        .await
        .map_err(|source| PersistError::Io {
            path: path.clone(),
            source,
        })?;
    info!(path = %path.display(), "Wrote article snapshot");

    Ok(path)
}
