//! Frequency-based extractive summarizer.

use super::Summarizer;
use super::text::{is_stopword, split_sentences, words};
use std::collections::HashMap;

/// Scores each sentence by the mean document frequency of its content words
/// and keeps the best ones in their original order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrequencySummarizer;

impl Summarizer for FrequencySummarizer {
    fn summarize(&self, text: &str, sentences: usize) -> String {
        let all = split_sentences(text);
        if all.is_empty() || sentences == 0 {
            return String::new();
        }
        if all.len() <= sentences {
            return all.join("\n");
        }

        let content_words = |s: &str| -> Vec<String> {
            words(s)
                .into_iter()
                .filter(|w| !is_stopword(w))
                .map(str::to_lowercase)
                .collect()
        };

        let mut freq: HashMap<String, usize> = HashMap::new();
        for sentence in &all {
            for w in content_words(sentence) {
                *freq.entry(w).or_default() += 1;
            }
        }

        let mut scored: Vec<(usize, f64)> = all
            .iter()
            .enumerate()
            .map(|(i, sentence)| {
                let tokens = content_words(sentence);
                let score = if tokens.is_empty() {
                    0.0
                } else {
                    tokens.iter().map(|w| freq[w] as f64).sum::<f64>() / tokens.len() as f64
                };
                (i, score)
            })
            .collect();

        // Highest score first; earlier sentence wins a tie.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        let mut keep: Vec<usize> = scored.into_iter().take(sentences).map(|(i, _)| i).collect();
        keep.sort_unstable();

        keep.into_iter()
            .map(|i| all[i].as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
