//! Data models for NewsAPI search results and the saved snapshot.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: One search result as returned by the upstream API
//! - [`FetchRequest`]: What to search for on a single run
//! - [`SearchResponse`] / [`ApiErrorBody`]: Upstream response envelopes
//! - [`SavedArticles`]: The JSON document written to disk
//!
//! Upstream records use camelCase field names (`publishedAt`, `urlToImage`),
//! so the structs rename on the wire and keep snake_case in Rust.

use serde::{Deserialize, Serialize};

/// The outlet an [`Article`] came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleSource {
    /// NewsAPI's identifier for the outlet, `null` for most smaller sources.
    pub id: Option<String>,
    /// Display name of the outlet.
    pub name: Option<String>,
}

/// A single news search result.
///
/// Every field is optional because the upstream API omits or nulls them
/// freely. Use [`crate::validate::is_valid`] before relying on the text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Option<ArticleSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    /// ISO-8601 publication time as reported by the outlet.
    pub published_at: Option<String>,
    /// Truncated body text; NewsAPI cuts this at 200 characters.
    pub content: Option<String>,
}

impl Article {
    /// Name of the outlet, if the upstream record carried one.
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// Parameters for one search.
///
/// The credential is held by [`crate::api::NewsApiClient`], not here, so a
/// request can be logged without leaking the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Search term passed through as `q`.
    pub query: String,
    /// Page size; the CLI restricts this to 1..=100.
    pub count: u32,
    /// Only include articles published within this many days.
    pub since_days: Option<u32>,
}

/// Successful body of `GET /v2/everything`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub status: String,
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Error body NewsAPI sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub message: Option<String>,
}

/// The snapshot written by [`crate::outputs::json::save_articles`].
#[derive(Debug, Deserialize, Serialize)]
pub struct SavedArticles {
    /// Local ISO-8601 time the snapshot was taken.
    pub timestamp: String,
    /// The search term that produced these articles.
    pub query: String,
    pub num_articles: usize,
    pub articles: Vec<Article>,
}
