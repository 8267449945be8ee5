//! Exponential backoff for article fetches.
//!
//! [`RetryExtractor`] wraps any [`ArticleExtractor`] and retries failures
//! that [`ExtractError::is_transient`] classifies as worth another try
//! (timeouts, connection errors, HTTP 429/5xx). Persistent failures are
//! returned immediately so the pipeline can skip the article.
//!
//! # Backoff Strategy
//!
//! ```text
//! delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
//! ```

use super::ArticleExtractor;
use crate::config::RetrySettings;
use crate::errors::ExtractError;
use crate::models::ExtractedPage;
use async_trait::async_trait;
use rand::{Rng, rng};
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{error, instrument, warn};

const MAX_JITTER_MS: u64 = 250;

pub struct RetryExtractor<T> {
    inner: T,
    max_retries: usize,
    base_delay: Duration,
    max_delay: Duration,
}

impl<T> RetryExtractor<T>
where
    T: ArticleExtractor,
{
    pub fn new(inner: T, settings: &RetrySettings) -> Self {
        Self {
            inner,
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
        }
    }

    fn delay_for(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(31) as u32;
        let delay = self.base_delay.saturating_mul(1 << shift).min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=MAX_JITTER_MS);
        delay + Duration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryExtractor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExtractor")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

#[async_trait]
impl<T> ArticleExtractor for RetryExtractor<T>
where
    T: ArticleExtractor,
{
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn extract(&self, url: &str) -> Result<ExtractedPage, ExtractError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.extract(url).await {
                Ok(page) => return Ok(page),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis(),
                            error = %e,
                            "extract() exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis(),
                        ?delay,
                        error = %e,
                        "extract() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}
