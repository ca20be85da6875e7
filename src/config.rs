//! Runtime settings: optional YAML file merged under the CLI flags.
//!
//! Precedence is CLI flag (or its environment variable) first, then the
//! config file, then the built-in defaults below.
//!
//! ```yaml
//! api_key: "0123456789abcdef"
//! base_url: "https://newsapi.org/v2/everything"
//! language: en
//! sort_by: publishedAt
//! timeout_secs: 30
//! output_dir: ./snapshots
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_SORT_BY: &str = "publishedAt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of the optional YAML config file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub sort_by: Option<String>,
    pub timeout_secs: Option<u64>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: Url,
    pub language: String,
    pub sort_by: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
}

// Hand-written so the key never reaches the logs.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("language", &self.language)
            .field("sort_by", &self.sort_by)
            .field("timeout", &self.timeout)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

/// Read and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded config file");
    Ok(config)
}

impl Settings {
    /// Merge CLI flags over an (optional) config file.
    ///
    /// An empty string counts as "not given" for the API key so that an
    /// exported-but-blank `NEWSAPI_KEY` still falls through to the file or
    /// the prompt.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let base_url = cli
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|e| ConfigError::BaseUrl(base_url, e))?;

        let api_key = cli
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or(file.api_key.filter(|k| !k.trim().is_empty()));

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            api_key,
            base_url,
            language: file
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            sort_by: file.sort_by.unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            output_dir: cli
                .output_dir
                .clone()
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}
