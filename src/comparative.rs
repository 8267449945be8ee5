//! Cross-article comparison: sentiment distribution and topic overlap.

use crate::models::{ArticleResult, ComparativeScore, SentimentDistribution, TopicOverlapReport, UniqueTopics};

/// Tally sentiment labels and intersect topics across `articles`.
///
/// Common topics start as the first article's topics and are narrowed by
/// each following article in order, keeping the first article's ordering.
/// An empty slice yields an all-zero distribution and an empty report.
pub fn compare(articles: &[ArticleResult]) -> ComparativeScore {
    let mut distribution = SentimentDistribution::default();
    let mut common_topics: Vec<String> = Vec::new();
    let mut unique_topics = Vec::with_capacity(articles.len());

    for (idx, article) in articles.iter().enumerate() {
        distribution.record(article.sentiment);
        unique_topics.push(article.topics.clone());
        if idx == 0 {
            common_topics = article.topics.clone();
        } else {
            common_topics.retain(|t| article.topics.contains(t));
        }
    }

    ComparativeScore {
        sentiment_distribution: distribution,
        topic_overlap: TopicOverlapReport {
            common_topics,
            unique_topics: UniqueTopics(unique_topics),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sentiment;

    fn article(sentiment: Sentiment, topics: &[&str]) -> ArticleResult {
        ArticleResult {
            title: "t".to_string(),
            summary: "s".to_string(),
            sentiment,
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input() {
        let score = compare(&[]);
        assert_eq!(
            score.sentiment_distribution,
            SentimentDistribution {
                positive: 0,
                negative: 0,
                neutral: 0
            }
        );
        assert!(score.topic_overlap.common_topics.is_empty());
        assert!(score.topic_overlap.unique_topics.is_empty());
    }

    #[test]
    fn test_single_article_common_equals_own_topics() {
        let score = compare(&[article(Sentiment::Negative, &["Tesla", "recall"])]);
        assert_eq!(score.topic_overlap.common_topics, strings(&["Tesla", "recall"]));
        assert_eq!(score.sentiment_distribution.negative, 1);
        assert_eq!(score.sentiment_distribution.total(), 1);
    }

    #[test]
    fn test_overlap_example() {
        let articles = [
            article(Sentiment::Positive, &["A", "B"]),
            article(Sentiment::Positive, &["B", "C"]),
            article(Sentiment::Negative, &["B"]),
        ];
        let score = compare(&articles);
        let overlap = &score.topic_overlap;
        assert_eq!(overlap.common_topics, strings(&["B"]));
        assert_eq!(overlap.unique_topics.get(1).unwrap(), strings(&["A", "B"]).as_slice());
        assert_eq!(overlap.unique_topics.get(2).unwrap(), strings(&["B", "C"]).as_slice());
        assert_eq!(overlap.unique_topics.get(3).unwrap(), strings(&["B"]).as_slice());
        assert!(overlap.unique_topics.get(0).is_none());
        assert!(overlap.unique_topics.get(4).is_none());
    }

    #[test]
    fn test_distribution_sums_to_len() {
        let labels = [
            Sentiment::Positive,
            Sentiment::Neutral,
            Sentiment::Neutral,
            Sentiment::Negative,
            Sentiment::Positive,
            Sentiment::Neutral,
        ];
        for n in 1..=labels.len() {
            let articles: Vec<_> = labels[..n].iter().map(|s| article(*s, &[])).collect();
            let d = compare(&articles).sentiment_distribution;
            assert_eq!(d.total(), n);
        }
        let articles: Vec<_> = labels.iter().map(|s| article(*s, &[])).collect();
        let d = compare(&articles).sentiment_distribution;
        assert_eq!((d.positive, d.negative, d.neutral), (2, 1, 3));
    }

    #[test]
    fn test_disjoint_topics_have_no_common() {
        let score = compare(&[
            article(Sentiment::Neutral, &["A"]),
            article(Sentiment::Neutral, &["B"]),
            article(Sentiment::Neutral, &["A", "B"]),
        ]);
        assert!(score.topic_overlap.common_topics.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let articles = [
            article(Sentiment::Positive, &["A", "B", "C"]),
            article(Sentiment::Neutral, &["C", "A"]),
        ];
        let first = compare(&articles);
        let second = compare(&articles);
        assert_eq!(first, second);
        assert_eq!(first.topic_overlap.common_topics, strings(&["A", "C"]));
    }
}
