//! Runtime configuration loaded from an optional YAML file.
//!
//! Every section falls back to its defaults, so an empty file (or no file at
//! all) yields a working configuration. CLI flags and environment variables
//! are applied on top by [`Settings::with_overrides`].
//!
//! ```yaml
//! max_articles: 10
//! concurrency: 4
//! news:
//!   api_key: "..."
//! fetch:
//!   timeout_secs: 10
//! narration:
//!   enabled: true
//!   language: hi
//! ```

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

pub const DEFAULT_MAX_ARTICLES: usize = 10;
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_SUMMARY_SENTENCES: usize = 5;
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";
pub const DEFAULT_NARRATION_LANGUAGE: &str = "hi";

/// Top-level settings for one analysis service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of candidate URLs requested from the news search.
    pub max_articles: usize,
    /// Number of articles processed at the same time.
    pub concurrency: usize,
    /// Sentences kept when an article has no meta description.
    pub summary_sentences: usize,
    pub news: NewsSettings,
    pub fetch: FetchSettings,
    pub retry: RetrySettings,
    pub narration: NarrationSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NewsSettings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub sort_by: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NarrationSettings {
    pub enabled: bool,
    /// Target language for translation and speech, as an ISO 639-1 code.
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_articles: DEFAULT_MAX_ARTICLES,
            concurrency: DEFAULT_CONCURRENCY,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            news: NewsSettings::default(),
            fetch: FetchSettings::default(),
            retry: RetrySettings::default(),
            narration: NarrationSettings::default(),
        }
    }
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_NEWS_API_URL.to_string(),
            api_key: None,
            language: "en".to_string(),
            sort_by: "relevancy".to_string(),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            language: DEFAULT_NARRATION_LANGUAGE.to_string(),
            timeout_secs: 20,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or return defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };

        let path_display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;
        let settings = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path_display.clone(),
            source,
        })?;
        info!(path = %path_display, "Loaded configuration");
        Ok(settings)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Apply CLI/env overrides and clamp values that must be at least one.
    pub fn with_overrides(mut self, news_api_key: Option<String>) -> Self {
        if let Some(key) = news_api_key.filter(|k| !k.trim().is_empty()) {
            self.news.api_key = Some(key);
        }
        self.concurrency = self.concurrency.max(1);
        self.summary_sentences = self.summary_sentences.max(1);
        self
    }
}
