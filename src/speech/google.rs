//! Google Translate and Google Translate TTS clients.
//!
//! These are the same public endpoints used by the Translate web widget.
//! TTS accepts at most [`TTS_MAX_CHARS`] characters per request, so longer
//! text is split on word boundaries and the MP3 segments are concatenated.

use super::{SpeechSynthesizer, Translator};
use crate::errors::CapabilityError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

pub const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const TTS_URL: &str = "https://translate.google.com/translate_tts";
pub const TTS_MAX_CHARS: usize = 100;

fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent.to_string())
        .build()
}

#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
}

impl GoogleTranslator {
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    #[instrument(level = "info", skip_all, fields(%target))]
    async fn translate(&self, text: &str, target: &str) -> Result<String, CapabilityError> {
        let fail = |e: reqwest::Error| CapabilityError::Translation(e.to_string());
        let body: Value = self
            .client
            .get(TRANSLATE_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(fail)?
            .error_for_status()
            .map_err(fail)?
            .json()
            .await
            .map_err(fail)?;

        parse_translation(&body)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The response is a nested array whose first element lists segments as
/// `[translated, original, ...]`.
pub fn parse_translation(body: &Value) -> Result<String, CapabilityError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| CapabilityError::Translation("unexpected response shape".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(CapabilityError::Translation("empty translation".to_string()));
    }
    Ok(translated)
}

#[derive(Debug, Clone)]
pub struct GoogleTts {
    client: Client,
}

impl GoogleTts {
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    #[instrument(level = "info", skip_all, fields(%language))]
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, CapabilityError> {
        let chunks = chunk_text(text, TTS_MAX_CHARS);
        if chunks.is_empty() {
            return Err(CapabilityError::Speech("nothing to speak".to_string()));
        }

        let fail = |e: reqwest::Error| CapabilityError::Speech(e.to_string());
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let url = tts_url(chunk, language, idx, chunks.len());
            let bytes = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(fail)?
                .error_for_status()
                .map_err(fail)?
                .bytes()
                .await
                .map_err(fail)?;
            debug!(idx, bytes = bytes.len(), "Synthesized TTS chunk");
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }
}

fn tts_url(chunk: &str, language: &str, idx: usize, total: usize) -> String {
    format!(
        "{}?ie=UTF-8&client=tw-ob&q={}&tl={}&total={}&idx={}&textlen={}",
        TTS_URL,
        urlencoding::encode(chunk),
        urlencoding::encode(language),
        total,
        idx,
        chunk.chars().count()
    )
}

/// Split text into pieces of at most `max_chars` characters, breaking on
/// whitespace where possible and hard-splitting words that are too long.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
