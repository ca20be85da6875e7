//! NewsAPI search client.
//!
//! One request per search, no retries. The client surfaces failures as
//! [`FetchError`] through [`NewsApiClient::try_fetch`]; [`NewsApiClient::fetch`]
//! logs them and hands back an empty list so a bad response never ends the run.
//!
//! # Request
//!
//! ```text
//! GET https://newsapi.org/v2/everything
//!     ?apiKey=...&q=tesla&pageSize=5
//!     &sortBy=publishedAt&language=en&searchIn=title,description
//!     [&from=2025-01-08]
//! ```

use crate::config::Settings;
use crate::error::FetchError;
use crate::models::{ApiErrorBody, Article, FetchRequest, SearchResponse};
use crate::utils::{since_date, truncate_for_log};
use crate::validate::filter_valid;
use chrono::{Local, NaiveDate};
use reqwest::StatusCode;
use std::fmt;
use std::time::Instant;
use tracing::{error, info, instrument, warn};
use url::Url;

/// Fields the keyword search is matched against.
const SEARCH_IN: &str = "title,description";

/// Client for the `everything` search endpoint.
pub struct NewsApiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
    language: String,
    sort_by: String,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("language", &self.language)
            .field("sort_by", &self.sort_by)
            .finish()
    }
}

impl NewsApiClient {
    /// Build a client from resolved settings and a credential.
    ///
    /// # Errors
    ///
    /// [`FetchError::Transport`] if the underlying HTTP client cannot be
    /// constructed (e.g. the TLS backend fails to initialise).
    pub fn new(settings: &Settings, api_key: String) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: settings.base_url.clone(),
            language: settings.language.clone(),
            sort_by: settings.sort_by.clone(),
        })
    }

    /// Query string for `request`, with `from` computed relative to `today`.
    pub fn query_params(&self, request: &FetchRequest, today: NaiveDate) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apiKey", self.api_key.clone()),
            ("q", request.query.clone()),
            ("pageSize", request.count.to_string()),
            ("sortBy", self.sort_by.clone()),
            ("language", self.language.clone()),
            ("searchIn", SEARCH_IN.to_string()),
        ];
        if let Some(days) = request.since_days {
            match since_date(today, days) {
                Some(from) => params.push(("from", from)),
                None => warn!(days, "Day window reaches past the earliest date; searching without `from`"),
            }
        }
        params
    }

    /// Run one search and return the validated articles in upstream order.
    ///
    /// # Errors
    ///
    /// - [`FetchError::BadStatus`] for any status other than 200, carrying the
    ///   upstream error message when the body has one
    /// - [`FetchError::Transport`] when the request or body read fails
    /// - [`FetchError::Unexpected`] for an undecodable body or a body whose
    ///   `status` is not `"ok"`
    #[instrument(level = "info", skip(self, request), fields(query = %request.query, count = request.count))]
    pub async fn try_fetch(&self, request: &FetchRequest) -> Result<Vec<Article>, FetchError> {
        let t0 = Instant::now();
        let params = self.query_params(request, Local::now().date_naive());

        let response = self
            .http
            .get(self.base_url.clone())
            .query(&params)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| match (b.code, b.message) {
                    (Some(code), Some(message)) => Some(format!("{message} ({code})")),
                    (None, Some(message)) => Some(message),
                    (Some(code), None) => Some(code),
                    (None, None) => None,
                })
                .unwrap_or_else(|| truncate_for_log(&body, 300));
            return Err(FetchError::BadStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            FetchError::Unexpected(format!(
                "undecodable response body ({e}): {}",
                truncate_for_log(&body, 300)
            ))
        })?;
        if parsed.status != "ok" {
            return Err(FetchError::Unexpected(format!(
                "NewsAPI reported status {:?}",
                parsed.status
            )));
        }

        let total_results = parsed.total_results;
        let received = parsed.articles.len();
        let (articles, filtered) = filter_valid(parsed.articles);

        info!(
            received,
            kept = articles.len(),
            filtered,
            ?total_results,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched articles"
        );
        Ok(articles)
    }

    /// Like [`Self::try_fetch`], but logs any failure and returns an empty list.
    #[instrument(level = "info", skip_all)]
    pub async fn fetch(&self, request: &FetchRequest) -> Vec<Article> {
        match self.try_fetch(request).await {
            Ok(articles) => articles,
            Err(e @ FetchError::BadStatus { .. }) => {
                warn!(error = %e, "Search rejected by NewsAPI");
                Vec::new()
            }
            Err(FetchError::Transport(e)) => {
                error!(
                    error = %e,
                    timeout = e.is_timeout(),
                    connect = e.is_connect(),
                    "Could not reach NewsAPI"
                );
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "Search failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str) -> Settings {
        Settings {
            api_key: None,
            base_url: Url::parse(base_url).unwrap(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            timeout: Duration::from_secs(5),
            output_dir: PathBuf::from("."),
        }
    }

    fn client(base_url: &str) -> NewsApiClient {
        NewsApiClient::new(&settings(base_url), "test-key".to_string()).unwrap()
    }

    fn request(since_days: Option<u32>) -> FetchRequest {
        FetchRequest {
            query: "tesla".to_string(),
            count: 5,
            since_days,
        }
    }

    #[test]
    fn test_query_params_without_window() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let params = client("https://newsapi.org/v2/everything").query_params(&request(None), today);

        assert!(params.contains(&("apiKey", "test-key".to_string())));
        assert!(params.contains(&("q", "tesla".to_string())));
        assert!(params.contains(&("pageSize", "5".to_string())));
        assert!(params.contains(&("sortBy", "publishedAt".to_string())));
        assert!(params.contains(&("language", "en".to_string())));
        assert!(params.contains(&("searchIn", "title,description".to_string())));
        assert!(params.iter().all(|(k, _)| *k != "from"));
    }

    #[test]
    fn test_query_params_with_week_window() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let params =
            client("https://newsapi.org/v2/everything").query_params(&request(Some(7)), today);
        assert!(params.contains(&("from", "2025-01-08".to_string())));
    }

    #[test]
    fn test_query_params_huge_window_omits_from() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let params = client("https://newsapi.org/v2/everything")
            .query_params(&request(Some(u32::MAX)), today);
        assert!(params.iter().all(|(k, _)| *k != "from"));
        assert!(params.contains(&("q", "tesla".to_string())));
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let err = client.try_fetch(&request(None)).await.unwrap_err();
        assert!(matches!(err, FetchError::BadStatus { status: 204, .. }));
        assert!(client.fetch(&request(None)).await.is_empty());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let dbg = format!("{:?}", client("https://newsapi.org/v2/everything"));
        assert!(!dbg.contains("test-key"));
    }

    #[tokio::test]
    async fn test_fetch_filters_invalid_articles() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "Example"},
                    "title": "A",
                    "author": "X",
                    "description": "d",
                    "url": "u",
                    "publishedAt": "2025-01-15T10:00:00Z"
                },
                {
                    "source": {"id": null, "name": "Example"},
                    "title": null,
                    "author": "Y",
                    "description": "e",
                    "url": "v"
                }
            ]
        });

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("apiKey", "test-key"))
            .and(query_param("q", "tesla"))
            .and(query_param("pageSize", "5"))
            .and(query_param_is_missing("from"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&format!("{}/v2/everything", server.uri()));
        let articles = client.fetch(&request(None)).await;

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("A"));
        assert_eq!(articles[0].source_name(), Some("Example"));
    }

    #[tokio::test]
    async fn test_fetch_sends_from_when_window_given() {
        let server = MockServer::start().await;
        let expected_from = since_date(Local::now().date_naive(), 3).unwrap();

        Mock::given(method("GET"))
            .and(query_param("from", expected_from.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "ok", "totalResults": 0, "articles": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let articles = client(&server.uri()).try_fetch(&request(Some(3))).await.unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_bad_status_carries_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "status": "error",
                "code": "apiKeyInvalid",
                "message": "Your API key is invalid."
            })))
            .mount(&server)
            .await;

        let err = client(&server.uri()).try_fetch(&request(None)).await.unwrap_err();
        match err {
            FetchError::BadStatus { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Your API key is invalid. (apiKeyInvalid)");
            }
            other => panic!("expected BadStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_status_with_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = client(&server.uri()).try_fetch(&request(None)).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::BadStatus { status: 500, ref message } if message == "upstream exploded"
        ));
    }

    #[tokio::test]
    async fn test_fetch_returns_empty_on_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let articles = client(&server.uri()).fetch(&request(None)).await;
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let err = client.try_fetch(&request(None)).await.unwrap_err();
        assert!(matches!(err, FetchError::Unexpected(_)));
        assert!(client.fetch(&request(None)).await.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_in_ok_body_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "error"})),
            )
            .mount(&server)
            .await;

        let err = client(&server.uri()).try_fetch(&request(None)).await.unwrap_err();
        assert!(matches!(err, FetchError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Nothing listens on port 1.
        let client = client("http://127.0.0.1:1/v2/everything");
        let err = client.try_fetch(&request(None)).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(client.fetch(&request(None)).await.is_empty());
    }
}
