//! In-process text capabilities: summarization, topic extraction, and
//! sentence-level sentiment.
//!
//! Each capability sits behind a small synchronous trait so the pipeline can
//! be handed any implementation (a remote model, a test fake). The default
//! implementations in the submodules are deterministic and need no model
//! files:
//!
//! | Trait | Default | Approach |
//! |-------|---------|----------|
//! | [`Summarizer`] | [`FrequencySummarizer`] | Sentence scoring by word frequency |
//! | [`TopicExtractor`] | [`HeuristicTopicExtractor`] | Capitalized runs + keyword phrases |
//! | [`SentimentScorer`] | [`LexiconSentimentScorer`] | Word polarity lexicon with negation |

pub mod sentiment;
pub mod summarizer;
pub mod text;
pub mod topics;

use crate::errors::CapabilityError;
use crate::models::Sentiment;

pub use sentiment::LexiconSentimentScorer;
pub use summarizer::FrequencySummarizer;
pub use topics::HeuristicTopicExtractor;

/// Produces an extractive summary: a subset of the input's own sentences.
pub trait Summarizer: Send + Sync {
    /// Select at most `sentences` sentences from `text`, in original order,
    /// joined by newlines. Text with no sentences yields an empty string.
    fn summarize(&self, text: &str, sentences: usize) -> String;
}

/// Returns a short ordered list of salient topic strings.
pub trait TopicExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Vec<String>, CapabilityError>;
}

/// Sentence-level polarity rolled up into one label.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    pub positive_statements: Vec<String>,
    pub negative_statements: Vec<String>,
}

pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<SentimentReport, CapabilityError>;
}
