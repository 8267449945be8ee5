//! Error types for each layer of the analysis pipeline.
//!
//! Failures are split by how the pipeline recovers from them:
//!
//! - [`ExtractError`]: a single article could not be fetched or parsed; the
//!   article is skipped.
//! - [`CapabilityError`]: an NLP or speech capability failed; the caller
//!   substitutes a safe default (empty topics, `Neutral`, no audio).
//! - [`AppError`]: the request as a whole failed and is reported to the caller.

use thiserror::Error;

/// Failure while fetching or parsing a single article page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("No content found")]
    NoContent,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ExtractError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ExtractError::Timeout(_) | ExtractError::Transport(_) => true,
            ExtractError::Status(code) => *code == 429 || *code >= 500,
            ExtractError::NoContent | ExtractError::InvalidUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ExtractError::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            ExtractError::Status(status.as_u16())
        } else {
            ExtractError::Transport(e.to_string())
        }
    }
}

/// Failure of one of the per-article or narration capabilities.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("topic extraction failed: {0}")]
    Topics(String),
    #[error("sentiment scoring failed: {0}")]
    Sentiment(String),
    #[error("translation failed: {0}")]
    Translation(String),
    #[error("speech synthesis failed: {0}")]
    Speech(String),
    #[error("audio spooling failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of the news search collaborator.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("news search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("news search returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("news search API key is not configured")]
    MissingApiKey,
}

/// Request-level failure surfaced to the API caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing 'company' in request body")]
    MissingCompany,
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("{0}")]
    Internal(String),
}

/// Failure loading the YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
