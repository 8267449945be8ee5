//! [NewsAPI](https://newsapi.org) search client.
//!
//! Queries the `/v2/everything` endpoint and returns article URLs in the
//! order the API ranks them.

use super::NewsSearch;
use crate::config::{FetchSettings, NewsSettings};
use crate::errors::SearchError;
use async_trait::async_trait;
use itertools::Itertools;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<ArticleRef>,
}

#[derive(Debug, Deserialize)]
struct ArticleRef {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    settings: NewsSettings,
}

impl NewsApiClient {
    pub fn new(settings: NewsSettings, fetch: &FetchSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(fetch.timeout_secs))
            .build()?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl NewsSearch for NewsApiClient {
    #[instrument(level = "info", skip(self))]
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingApiKey)?;
        let page_size = limit.to_string();

        let response = self
            .client
            .get(&self.settings.api_url)
            .query(&[
                ("q", query),
                ("apiKey", api_key),
                ("language", self.settings.language.as_str()),
                ("pageSize", page_size.as_str()),
                ("sortBy", self.settings.sort_by.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let urls = parse_everything(status.as_u16(), &body, limit)?;
        info!(count = urls.len(), "Found candidate article URLs");
        debug!(?urls, "NewsAPI URLs");
        Ok(urls)
    }
}

/// Turn a NewsAPI response body into a de-duplicated list of valid URLs.
fn parse_everything(status: u16, body: &str, limit: usize) -> Result<Vec<String>, SearchError> {
    let parsed: Result<EverythingResponse, _> = serde_json::from_str(body);
    let response = match parsed {
        Ok(r) if r.status == "ok" && (200..300).contains(&status) => r,
        Ok(r) => {
            return Err(SearchError::Api {
                status,
                message: r.message.unwrap_or_else(|| format!("status {:?}", r.status)),
            });
        }
        Err(e) => {
            return Err(SearchError::Api {
                status,
                message: format!("unreadable response: {e}"),
            });
        }
    };

    Ok(response
        .articles
        .into_iter()
        .filter_map(|a| a.url)
        .filter(|u| match Url::parse(u) {
            Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
            Err(e) => {
                warn!(url = %u, error = %e, "Dropping invalid article URL");
                false
            }
        })
        .unique()
        .take(limit)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_response() {
        let body = r#"{
            "status": "ok",
            "totalResults": 4,
            "articles": [
                {"url": "https://a.example/1", "title": "One"},
                {"url": "https://a.example/1", "title": "Duplicate"},
                {"url": "not a url"},
                {"title": "No URL"},
                {"url": "https://b.example/2"}
            ]
        }"#;
        let urls = parse_everything(200, body, 10).unwrap();
        assert_eq!(urls, vec!["https://a.example/1", "https://b.example/2"]);
    }

    #[test]
    fn test_parse_respects_limit() {
        let body = r#"{"status":"ok","articles":[{"url":"https://a/1"},{"url":"https://a/2"}]}"#;
        assert_eq!(parse_everything(200, body, 1).unwrap(), vec!["https://a/1"]);
    }

    #[test]
    fn test_parse_error_response() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let err = parse_everything(401, body, 10).unwrap_err();
        match err {
            SearchError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Your API key is invalid.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_everything(502, "<html>bad gateway</html>", 10).is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = NewsApiClient::new(NewsSettings::default(), &FetchSettings::default()).unwrap();
        let err = client.search("Tesla", 10).await.unwrap_err();
        assert!(matches!(err, SearchError::MissingApiKey));
    }
}
