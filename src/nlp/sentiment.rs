//! Lexicon-based sentence polarity.
//!
//! Each sentence gets a polarity in `[-1.0, 1.0]`: the mean score of the
//! polar words it contains, with a preceding negator flipping and damping the
//! next polar word. Sentences above [`POSITIVE_THRESHOLD`] count as positive
//! statements and below [`NEGATIVE_THRESHOLD`] as negative ones; the label is
//! whichever side has more statements, `Neutral` on a tie.

use super::text::{split_sentences, words};
use super::{SentimentReport, SentimentScorer};
use crate::errors::CapabilityError;
use crate::models::Sentiment;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;
const NEGATION_FACTOR: f64 = -0.5;
const INTENSIFIER_FACTOR: f64 = 1.3;

static LEXICON: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        // positive
        ("good", 0.7), ("great", 0.8), ("excellent", 1.0), ("strong", 0.4),
        ("stronger", 0.5), ("gain", 0.4), ("gains", 0.4), ("growth", 0.5),
        ("grow", 0.4), ("grew", 0.4), ("rise", 0.3), ("rises", 0.3), ("rose", 0.3),
        ("surge", 0.5), ("surged", 0.5), ("soar", 0.6), ("soared", 0.6),
        ("record", 0.3), ("profit", 0.4), ("profits", 0.4), ("profitable", 0.5),
        ("success", 0.6), ("successful", 0.7), ("win", 0.6), ("wins", 0.6),
        ("won", 0.6), ("beat", 0.4), ("beats", 0.4), ("boost", 0.5),
        ("boosted", 0.5), ("improve", 0.5), ("improved", 0.5), ("improvement", 0.5),
        ("innovative", 0.6), ("innovation", 0.5), ("optimistic", 0.6),
        ("positive", 0.5), ("upbeat", 0.6), ("robust", 0.5), ("best", 1.0),
        ("better", 0.5), ("happy", 0.8), ("love", 0.5), ("praised", 0.6),
        ("praise", 0.6), ("benefit", 0.4), ("benefits", 0.4), ("exciting", 0.6),
        ("impressive", 0.8), ("outperform", 0.5), ("outperformed", 0.5),
        ("rally", 0.4), ("rallied", 0.4), ("expansion", 0.3), ("breakthrough", 0.7),
        ("leading", 0.3), ("upgrade", 0.4), ("upgraded", 0.4), ("recovery", 0.4),
        ("fine", 0.4),
        // negative
        ("bad", -0.7), ("poor", -0.4), ("weak", -0.4), ("weaker", -0.5),
        ("loss", -0.5), ("losses", -0.5), ("lost", -0.4), ("decline", -0.4),
        ("declined", -0.4), ("drop", -0.3), ("dropped", -0.3), ("fall", -0.3),
        ("fell", -0.3), ("plunge", -0.6), ("plunged", -0.6), ("slump", -0.5),
        ("crash", -0.7), ("crisis", -0.6), ("fail", -0.5), ("failed", -0.5),
        ("failure", -0.6), ("lawsuit", -0.4), ("sued", -0.4), ("fraud", -0.8),
        ("scandal", -0.7), ("recall", -0.4), ("layoffs", -0.5), ("cut", -0.3),
        ("cuts", -0.3), ("risk", -0.3), ("risks", -0.3), ("concern", -0.3),
        ("concerns", -0.3), ("worried", -0.5), ("worse", -0.6), ("worst", -1.0),
        ("negative", -0.5), ("terrible", -1.0), ("awful", -1.0), ("investigation", -0.3),
        ("probe", -0.3), ("fined", -0.5), ("penalty", -0.5),
        ("downgrade", -0.5), ("downgraded", -0.5), ("miss", -0.4), ("missed", -0.4),
        ("criticized", -0.6), ("criticism", -0.5), ("controversy", -0.5),
        ("bankruptcy", -0.8), ("debt", -0.3), ("volatile", -0.3), ("delay", -0.3),
        ("delayed", -0.3), ("problem", -0.4), ("problems", -0.4), ("hurt", -0.5),
    ]
    .into_iter()
    .collect()
});

const NEGATORS: &[&str] = &["not", "no", "never", "neither", "nor", "without", "hardly"];
const INTENSIFIERS: &[&str] = &["very", "extremely", "highly", "really", "significantly", "sharply"];

#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentimentScorer;

/// Polarity of one sentence; `0.0` when it has no polar words.
pub fn sentence_polarity(sentence: &str) -> f64 {
    let mut scores = Vec::new();
    let mut negate = false;
    let mut intensify = false;

    for word in words(sentence) {
        let lower = word.to_lowercase();
        if NEGATORS.contains(&lower.as_str()) || lower.ends_with("n't") {
            negate = true;
            continue;
        }
        if INTENSIFIERS.contains(&lower.as_str()) {
            intensify = true;
            continue;
        }
        if let Some(&score) = LEXICON.get(lower.as_str()) {
            let mut score = score;
            if intensify {
                score *= INTENSIFIER_FACTOR;
            }
            if negate {
                score *= NEGATION_FACTOR;
            }
            scores.push(score.clamp(-1.0, 1.0));
            negate = false;
            intensify = false;
        }
    }

    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn score(&self, text: &str) -> Result<SentimentReport, CapabilityError> {
        let mut positive_statements = Vec::new();
        let mut negative_statements = Vec::new();

        for sentence in split_sentences(text) {
            let polarity = sentence_polarity(&sentence);
            if polarity > POSITIVE_THRESHOLD {
                positive_statements.push(sentence);
            } else if polarity < NEGATIVE_THRESHOLD {
                negative_statements.push(sentence);
            }
        }

        let sentiment = match positive_statements.len().cmp(&negative_statements.len()) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        };

        Ok(SentimentReport {
            sentiment,
            positive_statements,
            negative_statements,
        })
    }
}
