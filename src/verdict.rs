//! Final verdict synthesis: one paragraph of text plus optional narration.

use crate::models::{ComparativeScore, FinalVerdict};
use crate::nlp::Summarizer;
use crate::speech::{self, SpeechSynthesizer, Translator};
use tracing::{info, instrument, warn};
use unicode_normalization::UnicodeNormalization;

pub const NO_ARTICLES_TEXT: &str = "No valid articles found.";

/// Everything needed to turn verdict text into speech.
pub struct Narration<'a> {
    pub translator: &'a dyn Translator,
    pub synthesizer: &'a dyn SpeechSynthesizer,
    pub language: &'a str,
}

/// Compose the verdict text for `company`.
///
/// Returns `None` when no articles were counted. The one-sentence digest is
/// drawn from all `summaries` joined together; when they contain no sentence
/// the digest is empty. The result is NFC-normalized.
pub fn compose_text(
    score: &ComparativeScore,
    company: &str,
    summaries: &[String],
    summarizer: &dyn Summarizer,
) -> Option<String> {
    let dominant = score.sentiment_distribution.dominant()?;

    let combined = summaries.join(" ");
    let digest = summarizer.summarize(&combined, 1);

    let text = format!(
        "The latest news coverage on {company} is mostly {}. {digest}",
        dominant.as_str().to_lowercase()
    );
    Some(text.nfc().collect())
}

/// Build the [`FinalVerdict`], narrating it when `narration` is given.
///
/// Narration failures only drop the audio; the text is always returned.
#[instrument(level = "info", skip_all, fields(%company))]
pub async fn synthesize(
    score: &ComparativeScore,
    company: &str,
    summaries: &[String],
    summarizer: &dyn Summarizer,
    narration: Option<Narration<'_>>,
) -> FinalVerdict {
    let Some(text) = compose_text(score, company, summaries, summarizer) else {
        info!("No articles to summarize; skipping verdict synthesis");
        return FinalVerdict {
            text: NO_ARTICLES_TEXT.to_string(),
            audio: None,
        };
    };

    let audio = match narration {
        Some(n) => match speech::narrate(n.translator, n.synthesizer, &text, n.language).await {
            Ok(audio) => Some(audio),
            Err(e) => {
                warn!(error = %e, "Narration failed; returning verdict without audio");
                None
            }
        },
        None => None,
    };

    FinalVerdict { text, audio }
}
