//! End-to-end analysis of one company's news coverage.
//!
//! The [`Pipeline`] owns its [`Capabilities`] and runs:
//! 1. **Searching**: Ask the news index for up to `max_articles` URLs
//! 2. **Processing**: Extract, summarize, tag, and score each article on a
//!    bounded worker pool, keeping URL order
//! 3. **Comparing**: Aggregate sentiment and topic overlap
//! 4. **Concluding**: Compose and narrate the final verdict

use crate::comparative::compare;
use crate::config::Settings;
use crate::errors::AppError;
use crate::models::{AnalysisResult, ArticleResult, ExtractedPage, Sentiment};
use crate::nlp::{
    FrequencySummarizer, HeuristicTopicExtractor, LexiconSentimentScorer, SentimentScorer,
    Summarizer, TopicExtractor,
};
use crate::scrapers::article::HtmlArticleExtractor;
use crate::scrapers::news_api::NewsApiClient;
use crate::scrapers::retry::RetryExtractor;
use crate::scrapers::{ArticleExtractor, NewsSearch};
use crate::speech::{GoogleTranslator, GoogleTts, SpeechSynthesizer, Translator};
use crate::utils::truncate_for_log;
use crate::verdict::{self, Narration};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// The external and in-process collaborators the pipeline depends on.
#[derive(Clone)]
pub struct Capabilities {
    pub search: Arc<dyn NewsSearch>,
    pub extractor: Arc<dyn ArticleExtractor>,
    pub summarizer: Arc<dyn Summarizer>,
    pub topics: Arc<dyn TopicExtractor>,
    pub sentiment: Arc<dyn SentimentScorer>,
    pub translator: Arc<dyn Translator>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl Capabilities {
    /// Production collaborators built from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let extractor = RetryExtractor::new(HtmlArticleExtractor::new(&settings.fetch)?, &settings.retry);
        let narration_timeout = settings.narration.timeout_secs;
        let user_agent = settings.fetch.user_agent.as_str();

        Ok(Self {
            search: Arc::new(NewsApiClient::new(settings.news.clone(), &settings.fetch)?),
            extractor: Arc::new(extractor),
            summarizer: Arc::new(FrequencySummarizer),
            topics: Arc::new(HeuristicTopicExtractor),
            sentiment: Arc::new(LexiconSentimentScorer),
            translator: Arc::new(GoogleTranslator::new(narration_timeout, user_agent)?),
            synthesizer: Arc::new(GoogleTts::new(narration_timeout, user_agent)?),
        })
    }
}

pub struct Pipeline {
    capabilities: Capabilities,
    settings: Settings,
}

impl Pipeline {
    pub fn new(capabilities: Capabilities, settings: Settings) -> Self {
        Self {
            capabilities,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the full analysis for `company`.
    ///
    /// Only a failed news search fails the request; every per-article and
    /// narration failure is absorbed.
    #[instrument(level = "info", skip(self))]
    pub async fn analyze(&self, company: &str) -> Result<AnalysisResult, AppError> {
        let t0 = Instant::now();
        let urls = self
            .capabilities
            .search
            .search(company, self.settings.max_articles)
            .await?;
        let total = urls.len();
        info!(count = total, "Candidate URLs to analyze");

        let articles: Vec<ArticleResult> = stream::iter(urls)
            .map(|url| async move { self.process_url(&url).await })
            .buffered(self.settings.concurrency.max(1))
            .filter_map(|article| async move { article })
            .collect()
            .await;
        info!(
            total,
            successful = articles.len(),
            failed = total - articles.len(),
            "Completed article processing"
        );

        let comparative_score = compare(&articles);
        let summaries: Vec<String> = articles.iter().map(|a| a.summary.clone()).collect();

        let narration = self.settings.narration.enabled.then(|| Narration {
            translator: self.capabilities.translator.as_ref(),
            synthesizer: self.capabilities.synthesizer.as_ref(),
            language: self.settings.narration.language.as_str(),
        });
        let final_verdict = verdict::synthesize(
            &comparative_score,
            company,
            &summaries,
            self.capabilities.summarizer.as_ref(),
            narration,
        )
        .await;

        let elapsed = t0.elapsed();
        info!(
            ?elapsed,
            articles = articles.len(),
            topic_sets = comparative_score.topic_overlap.unique_topics.len(),
            common_topics = comparative_score.topic_overlap.common_topics.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            company: company.to_string(),
            articles,
            comparative_score,
            final_verdict,
        })
    }

    /// Extract and analyze one URL; `None` means the article is skipped.
    #[instrument(level = "debug", skip(self))]
    async fn process_url(&self, url: &str) -> Option<ArticleResult> {
        match self.capabilities.extractor.extract(url).await {
            Ok(page) => Some(self.analyze_page(page)),
            Err(e) => {
                warn!(%url, error = %e, "Failed to scrape article; skipping");
                None
            }
        }
    }

    /// Summarize, tag, and score an extracted page, substituting defaults for
    /// topic and sentiment failures.
    pub fn analyze_page(&self, page: ExtractedPage) -> ArticleResult {
        let caps = &self.capabilities;

        let summary = match page.description {
            Some(description) => description,
            None => caps.summarizer.summarize(&page.body, self.settings.summary_sentences),
        };

        let topics = caps.topics.extract(&page.body).unwrap_or_else(|e| {
            warn!(url = %page.url, error = %e, "Topic extraction failed; using no topics");
            Vec::new()
        });

        let sentiment = match caps.sentiment.score(&summary) {
            Ok(report) => {
                debug!(
                    url = %page.url,
                    positive = report.positive_statements.len(),
                    negative = report.negative_statements.len(),
                    "Scored sentiment"
                );
                report.sentiment
            }
            Err(e) => {
                warn!(url = %page.url, error = %e, "Sentiment scoring failed; defaulting to Neutral");
                Sentiment::Neutral
            }
        };

        debug!(
            url = %page.url,
            %sentiment,
            ?topics,
            summary = %truncate_for_log(&summary, 120),
            "Analyzed article"
        );

        ArticleResult {
            title: page.title,
            summary,
            sentiment,
            topics,
        }
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use crate::errors::{CapabilityError, ExtractError, SearchError};
    use crate::nlp::SentimentReport;
    use crate::speech::fakes::{BytesSynthesizer, EchoTranslator};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    pub struct FixedSearch(pub Result<Vec<String>, String>);

    #[async_trait]
    impl NewsSearch for FixedSearch {
        async fn search(&self, _query: &str, limit: usize) -> Result<Vec<String>, SearchError> {
            match &self.0 {
                Ok(urls) => Ok(urls.iter().take(limit).cloned().collect()),
                Err(message) => Err(SearchError::Api {
                    status: 500,
                    message: message.clone(),
                }),
            }
        }
    }

    /// Serves pages from a map; unknown URLs fail with 404.
    pub struct MapExtractor(pub HashMap<String, ExtractedPage>);

    #[async_trait]
    impl ArticleExtractor for MapExtractor {
        async fn extract(&self, url: &str) -> Result<ExtractedPage, ExtractError> {
            self.0.get(url).cloned().ok_or(ExtractError::Status(404))
        }
    }

    /// Serves pages after a per-URL delay, so completion order can differ
    /// from request order.
    pub struct DelayedExtractor(pub HashMap<String, (Duration, ExtractedPage)>);

    #[async_trait]
    impl ArticleExtractor for DelayedExtractor {
        async fn extract(&self, url: &str) -> Result<ExtractedPage, ExtractError> {
            let (delay, page) = self.0.get(url).cloned().ok_or(ExtractError::Status(404))?;
            tokio::time::sleep(delay).await;
            Ok(page)
        }
    }

    pub struct FailingTopics;

    impl TopicExtractor for FailingTopics {
        fn extract(&self, _text: &str) -> Result<Vec<String>, CapabilityError> {
            Err(CapabilityError::Topics("model missing".to_string()))
        }
    }

    pub struct FailingSentiment;

    impl SentimentScorer for FailingSentiment {
        fn score(&self, _text: &str) -> Result<SentimentReport, CapabilityError> {
            Err(CapabilityError::Sentiment("model missing".to_string()))
        }
    }

    pub fn page(url: &str, body: &str, description: Option<&str>) -> ExtractedPage {
        ExtractedPage {
            url: url.to_string(),
            title: format!("Title of {url}"),
            body: body.to_string(),
            description: description.map(str::to_string),
        }
    }

    pub fn capabilities(urls: Vec<&str>, pages: Vec<ExtractedPage>) -> Capabilities {
        Capabilities {
            search: Arc::new(FixedSearch(Ok(urls.into_iter().map(str::to_string).collect()))),
            extractor: Arc::new(MapExtractor(
                pages.into_iter().map(|p| (p.url.clone(), p)).collect(),
            )),
            summarizer: Arc::new(FrequencySummarizer),
            topics: Arc::new(HeuristicTopicExtractor),
            sentiment: Arc::new(LexiconSentimentScorer),
            translator: Arc::new(EchoTranslator),
            synthesizer: Arc::new(BytesSynthesizer),
        }
    }
}
