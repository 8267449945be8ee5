//! Data models for scraped pages, per-article results, and the analysis report.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ExtractedPage`]: Raw title/body/description pulled from an article page
//! - [`ArticleResult`]: One summarized, scored, and tagged article
//! - [`ComparativeScore`]: Cross-article sentiment distribution and topic overlap
//! - [`FinalVerdict`] and [`AnalysisResult`]: The report returned per request
//!
//! Field names on the wire follow the established JSON contract of the
//! service (`"Comparative Sentiment Score"`, `"Article 1"`, ...), hence the
//! `#[serde(rename)]` attributes.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Text pulled from an article page before any NLP runs on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    /// The URL the page was fetched from.
    pub url: String,
    /// Trimmed `<title>` text, or `"Title not found"`.
    pub title: String,
    /// All paragraph text joined with single spaces.
    pub body: String,
    /// Content of `<meta name="description">`, when present and non-empty.
    pub description: Option<String>,
}

/// Overall tone of a piece of text.
///
/// The declaration order (`Positive`, `Negative`, `Neutral`) is the
/// enumeration order used for distributions and tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully scraped and analyzed article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleResult {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    /// Unique topics in extraction-priority order, at most five.
    #[serde(rename = "Topics")]
    pub topics: Vec<String>,
}

/// Article counts per sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn record(&mut self, sentiment: Sentiment) {
        *self.count_mut(sentiment) += 1;
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    fn count_mut(&mut self, sentiment: Sentiment) -> &mut usize {
        match sentiment {
            Sentiment::Positive => &mut self.positive,
            Sentiment::Negative => &mut self.negative,
            Sentiment::Neutral => &mut self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// The label with the highest count. Ties resolve to the label that comes
    /// first in [`Sentiment::ALL`]. `None` when no articles were counted.
    pub fn dominant(&self) -> Option<Sentiment> {
        if self.is_empty() {
            return None;
        }
        let mut best = Sentiment::ALL[0];
        for candidate in Sentiment::ALL.into_iter().skip(1) {
            if self.count(candidate) > self.count(best) {
                best = candidate;
            }
        }
        Some(best)
    }
}

/// Each article's topics keyed by 1-based article position.
///
/// Serialized as an ordered JSON object `{"Article 1": [...], "Article 2": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueTopics(pub Vec<Vec<String>>);

impl UniqueTopics {
    /// Topics of the article at 1-based `position`.
    #[cfg(test)]
    pub fn get(&self, position: usize) -> Option<&[String]> {
        position
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn article_key(position: usize) -> String {
    format!("Article {position}")
}

impl Serialize for UniqueTopics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (i, topics) in self.0.iter().enumerate() {
            map.serialize_entry(&article_key(i + 1), topics)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UniqueTopics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UniqueTopicsVisitor;

        impl<'de> Visitor<'de> for UniqueTopicsVisitor {
            type Value = UniqueTopics;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of \"Article N\" keys to topic lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(usize, Vec<String>)> = Vec::new();
                while let Some((key, topics)) = access.next_entry::<String, Vec<String>>()? {
                    let position = key
                        .strip_prefix("Article ")
                        .and_then(|n| n.parse::<usize>().ok())
                        .filter(|n| *n >= 1)
                        .ok_or_else(|| de::Error::custom(format!("unexpected key {key:?}")))?;
                    entries.push((position, topics));
                }
                entries.sort_by_key(|(position, _)| *position);
                for (i, (position, _)) in entries.iter().enumerate() {
                    if *position != i + 1 {
                        return Err(de::Error::custom(format!(
                            "article positions must be contiguous from 1; found {position}"
                        )));
                    }
                }
                Ok(UniqueTopics(entries.into_iter().map(|(_, t)| t).collect()))
            }
        }

        deserializer.deserialize_map(UniqueTopicsVisitor)
    }
}

/// Topics shared by every article versus each article's own topics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicOverlapReport {
    #[serde(rename = "Common Topics")]
    pub common_topics: Vec<String>,
    #[serde(rename = "Unique Topics")]
    pub unique_topics: UniqueTopics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparativeScore {
    #[serde(rename = "Sentiment Distribution")]
    pub sentiment_distribution: SentimentDistribution,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: TopicOverlapReport,
}

/// The narrated conclusion of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalVerdict {
    pub text: String,
    /// Base64-encoded MP3 narration, absent when narration failed or is off.
    #[serde(rename = "audio_base64")]
    pub audio: Option<String>,
}

/// Everything produced for one company in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<ArticleResult>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative_score: ComparativeScore,
    #[serde(rename = "Final Sentiment Analysis")]
    pub final_verdict: FinalVerdict,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn article(sentiment: Sentiment, topics: &[&str]) -> ArticleResult {
        ArticleResult {
            title: "Title".to_string(),
            summary: "Summary".to_string(),
            sentiment,
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_dominant_prefers_max() {
        let d = SentimentDistribution {
            positive: 2,
            negative: 1,
            neutral: 0,
        };
        assert_eq!(d.dominant(), Some(Sentiment::Positive));

        let d = SentimentDistribution {
            positive: 0,
            negative: 1,
            neutral: 3,
        };
        assert_eq!(d.dominant(), Some(Sentiment::Neutral));
    }

    #[test]
    fn test_dominant_tie_goes_to_enumeration_order() {
        let d = SentimentDistribution {
            positive: 1,
            negative: 1,
            neutral: 1,
        };
        assert_eq!(d.dominant(), Some(Sentiment::Positive));

        let d = SentimentDistribution {
            positive: 0,
            negative: 2,
            neutral: 2,
        };
        assert_eq!(d.dominant(), Some(Sentiment::Negative));
    }

    #[test]
    fn test_dominant_empty_is_none() {
        assert_eq!(SentimentDistribution::default().dominant(), None);
    }

    #[test]
    fn test_article_wire_names() {
        let json = serde_json::to_value(article(Sentiment::Negative, &["Apple", "iPhone"])).unwrap();
        assert_eq!(json["Title"], "Title");
        assert_eq!(json["Sentiment"], "Negative");
        assert_eq!(json["Topics"][1], "iPhone");
    }

    #[test]
    fn test_unknown_sentiment_label_is_rejected() {
        let json = r#"{"Title":"t","Summary":"s","Sentiment":"Mixed","Topics":[]}"#;
        assert!(serde_json::from_str::<ArticleResult>(json).is_err());
    }

    #[test]
    fn test_unique_topics_keys_in_article_order() {
        let unique = UniqueTopics((1..=11).map(|i| vec![format!("t{i}")]).collect());
        let json = serde_json::to_string(&unique).unwrap();
        let first = json.find("\"Article 1\"").unwrap();
        let second = json.find("\"Article 2\"").unwrap();
        let tenth = json.find("\"Article 10\"").unwrap();
        assert!(first < second && second < tenth);
    }

    #[test]
    fn test_json_round_trip_preserves_set_membership() {
        let result = AnalysisResult {
            company: "Tesla".to_string(),
            articles: vec![
                article(Sentiment::Positive, &["A", "B"]),
                article(Sentiment::Neutral, &["B", "C"]),
            ],
            comparative_score: ComparativeScore {
                sentiment_distribution: SentimentDistribution {
                    positive: 1,
                    negative: 0,
                    neutral: 1,
                },
                topic_overlap: TopicOverlapReport {
                    common_topics: vec!["B".to_string()],
                    unique_topics: UniqueTopics(vec![
                        vec!["A".to_string(), "B".to_string()],
                        vec!["B".to_string(), "C".to_string()],
                    ]),
                },
            },
            final_verdict: FinalVerdict {
                text: "The latest news coverage on Tesla is mostly positive.".to_string(),
                audio: None,
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();

        let as_set = |v: &[String]| v.iter().cloned().collect::<BTreeSet<_>>();
        for (a, b) in result.articles.iter().zip(&back.articles) {
            assert_eq!(as_set(&a.topics), as_set(&b.topics));
        }
        let overlap = &back.comparative_score.topic_overlap;
        assert_eq!(as_set(&overlap.common_topics), as_set(&["B".to_string()]));
        assert_eq!(
            as_set(overlap.unique_topics.get(2).unwrap()),
            as_set(&["C".to_string(), "B".to_string()])
        );
        assert_eq!(back, result);
    }

    #[test]
    fn test_unique_topics_rejects_gaps() {
        let json = r#"{"Article 1": ["a"], "Article 3": ["b"]}"#;
        assert!(serde_json::from_str::<UniqueTopics>(json).is_err());
    }

    #[test]
    fn test_verdict_wire_name() {
        let v = FinalVerdict {
            text: "No valid articles found.".to_string(),
            audio: None,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert!(json["audio_base64"].is_null());
    }
}
