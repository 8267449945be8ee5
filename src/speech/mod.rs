//! Translation and speech synthesis for the narrated verdict.
//!
//! Both collaborators are remote services behind async traits. [`narrate`]
//! chains them: translate the verdict, synthesize speech in the target
//! language, spool the audio through a scoped temporary file, and return it
//! base64-encoded. The temporary file is removed when it goes out of scope,
//! whether narration succeeds or fails.

pub mod google;

use crate::errors::CapabilityError;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

pub use google::{GoogleTranslator, GoogleTts};

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the ISO 639-1 language `target`.
    async fn translate(&self, text: &str, target: &str) -> Result<String, CapabilityError>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text` in `language`, returning MP3 bytes.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, CapabilityError>;
}

/// Translate and speak `text`, returning base64-encoded MP3 audio.
#[instrument(level = "info", skip_all, fields(%language))]
pub async fn narrate(
    translator: &dyn Translator,
    synthesizer: &dyn SpeechSynthesizer,
    text: &str,
    language: &str,
) -> Result<String, CapabilityError> {
    let translated = translator.translate(text, language).await?;
    debug!(chars = translated.chars().count(), "Translated verdict");

    let audio = synthesizer.synthesize(&translated, language).await?;
    let audio_bytes = audio.len();
    let encoded = tokio::task::spawn_blocking(move || spool_and_encode(&audio))
        .await
        .map_err(|e| CapabilityError::Io(std::io::Error::other(e)))??;
    info!(audio_bytes, "Narration ready");
    Ok(encoded)
}

/// Spool audio through the system temp directory and base64-encode it.
fn spool_and_encode(audio: &[u8]) -> Result<String, CapabilityError> {
    spool_and_encode_in(&std::env::temp_dir(), audio)
}

/// Write audio to a temporary file in `dir`, read it back, and base64-encode it.
///
/// The file is removed when the spool is dropped, on success and on error.
fn spool_and_encode_in(dir: &Path, audio: &[u8]) -> Result<String, CapabilityError> {
    spool_with(dir, audio, |file| {
        let mut bytes = Vec::with_capacity(audio.len());
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    })
}

fn spool_with<F>(dir: &Path, audio: &[u8], read_back: F) -> Result<String, CapabilityError>
where
    F: FnOnce(&mut File) -> std::io::Result<Vec<u8>>,
{
    let mut spool = tempfile::Builder::new()
        .prefix("verdict_")
        .suffix(".mp3")
        .tempfile_in(dir)?;
    spool.write_all(audio)?;
    spool.flush()?;

    let file = spool.as_file_mut();
    file.seek(SeekFrom::Start(0))?;
    let bytes = read_back(file)?;

    Ok(STANDARD.encode(bytes))
}
