//! Topic extraction from capitalized-name runs and keyword phrases.
//!
//! The policy is a pipeline of pure steps:
//! `text → entity candidates ++ keyword candidates → dedupe → filter → truncate`.
//! Entities come first, in order of first occurrence; keywords follow, by
//! score and then first occurrence. Duplicates are compared case-insensitively
//! and the first spelling seen wins.

use super::TopicExtractor;
use super::text::{is_stopword, split_sentences, words};
use crate::errors::CapabilityError;
use itertools::Itertools;
use std::collections::HashMap;

/// Maximum number of topics reported per article.
pub const MAX_TOPICS: usize = 5;
/// Topics must be strictly longer than this many characters.
pub const MIN_TOPIC_CHARS: usize = 2;
/// Number of keyword phrases considered before merging with entities.
pub const KEYWORD_TOP_N: usize = 10;
/// Longest run of capitalized words treated as a single name.
pub const MAX_ENTITY_TOKENS: usize = 4;
/// A two-word phrase must repeat at least this often to count as a keyword.
pub const MIN_BIGRAM_COUNT: usize = 2;
pub const BIGRAM_WEIGHT: f64 = 1.5;

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTopicExtractor;

impl TopicExtractor for HeuristicTopicExtractor {
    fn extract(&self, text: &str) -> Result<Vec<String>, CapabilityError> {
        Ok(select_topics(
            entity_candidates(text),
            keyword_candidates(text, KEYWORD_TOP_N),
        ))
    }
}

/// Merge entity and keyword candidates, dedupe, filter by length, and
/// truncate to [`MAX_TOPICS`].
pub fn select_topics(entities: Vec<String>, keywords: Vec<String>) -> Vec<String> {
    entities
        .into_iter()
        .chain(keywords)
        .map(|t| t.trim().to_string())
        .filter(|t| t.chars().count() > MIN_TOPIC_CHARS)
        .unique_by(|t| t.to_lowercase())
        .take(MAX_TOPICS)
        .collect()
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Runs of capitalized, non-stopword tokens, in order of first occurrence.
///
/// A lone capitalized word at the start of a sentence is ignored, since its
/// capital letter says nothing about whether it is a name.
pub fn entity_candidates(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    for sentence in split_sentences(text) {
        let tokens = words(&sentence);
        let mut i = 0;
        while i < tokens.len() {
            if !is_capitalized(tokens[i]) || is_stopword(tokens[i]) {
                i += 1;
                continue;
            }
            let start = i;
            while i < tokens.len()
                && i - start < MAX_ENTITY_TOKENS
                && is_capitalized(tokens[i])
                && !is_stopword(tokens[i])
            {
                i += 1;
            }
            if start == 0 && i - start == 1 {
                continue;
            }
            found.push(tokens[start..i].join(" "));
        }
    }
    found.into_iter().unique_by(|e| e.to_lowercase()).collect()
}

struct Phrase {
    spelling: String,
    count: usize,
    first_seen: usize,
    words: usize,
}

/// Frequent single words and repeated two-word phrases, best first.
pub fn keyword_candidates(text: &str, top_n: usize) -> Vec<String> {
    let mut phrases: HashMap<String, Phrase> = HashMap::new();
    let mut position = 0usize;

    let mut bump = |spelling: String, words: usize, position: usize| {
        phrases
            .entry(spelling.to_lowercase())
            .and_modify(|p| p.count += 1)
            .or_insert(Phrase {
                spelling,
                count: 1,
                first_seen: position,
                words,
            });
    };

    for sentence in split_sentences(text) {
        let tokens = words(&sentence);
        for (j, token) in tokens.iter().enumerate() {
            position += 1;
            if is_stopword(token) || token.chars().all(|c| c.is_numeric()) {
                continue;
            }
            bump(token.to_string(), 1, position);
            if let Some(next) = tokens.get(j + 1) {
                if !is_stopword(next) && !next.chars().all(|c| c.is_numeric()) {
                    bump(format!("{token} {next}"), 2, position);
                }
            }
        }
    }

    let weight = |p: &Phrase| {
        if p.words > 1 {
            p.count as f64 * BIGRAM_WEIGHT
        } else {
            p.count as f64
        }
    };

    phrases
        .into_values()
        .filter(|p| p.words == 1 || p.count >= MIN_BIGRAM_COUNT)
        .sorted_by(|a, b| {
            weight(b)
                .total_cmp(&weight(a))
                .then(a.first_seen.cmp(&b.first_seen))
                .then(a.words.cmp(&b.words))
        })
        .take(top_n)
        .map(|p| p.spelling)
        .collect()
}
