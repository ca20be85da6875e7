//! Error types for each stage of the pipeline.
//!
//! Each stage returns its own closed enum so `main` can decide what to log
//! and whether to carry on. None of these abort a run once the client is
//! built; see [`crate::api::NewsApiClient::fetch`] and
//! [`crate::outputs::json::save_articles`].

use std::path::PathBuf;

/// Why a search produced no articles.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The API answered with a non-success HTTP status.
    #[error("NewsAPI returned HTTP {status}: {message}")]
    BadStatus { status: u16, message: String },

    /// The request never completed (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Anything else, e.g. an undecodable body.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Failure to write the JSON snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize articles: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Problems resolving settings at start-up.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid base URL {0:?}: {1}")]
    BaseUrl(String, url::ParseError),

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,

    #[error("no NewsAPI key provided")]
    MissingApiKey,
}
