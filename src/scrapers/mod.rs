//! Network collaborators that find and fetch news articles.
//!
//! Fetching follows a two-phase pattern:
//!
//! 1. **Searching**: Ask a news index for candidate article URLs ([`NewsSearch`])
//! 2. **Extracting**: Download each page and pull out title, body, and
//!    description ([`ArticleExtractor`])
//!
//! # Implementations
//!
//! | Trait | Module | Method | Notes |
//! |-------|--------|--------|-------|
//! | [`NewsSearch`] | [`news_api`] | NewsAPI `/v2/everything` | Requires an API key |
//! | [`ArticleExtractor`] | [`article`] | HTML scraping | Browser User-Agent, fixed timeout |
//! | [`ArticleExtractor`] | [`retry`] | Decorator | Backoff on transient failures |

pub mod article;
pub mod news_api;
pub mod retry;

use crate::errors::{ExtractError, SearchError};
use crate::models::ExtractedPage;
use async_trait::async_trait;

/// Finds candidate article URLs for a query.
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Return at most `limit` article URLs, most relevant first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError>;
}

/// Retrieves a page and extracts its article text.
#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<ExtractedPage, ExtractError>;
}
