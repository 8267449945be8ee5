//! # Company News Digest
//!
//! Fetches recent news about a company, scrapes and summarizes each article,
//! scores its sentiment, extracts topics, compares coverage across articles,
//! and narrates a one-paragraph verdict.
//!
//! ## Usage
//!
//! ```sh
//! company_news_digest serve --bind 127.0.0.1:5000
//! company_news_digest analyze "Tesla" -j ./reports
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Searching**: Find candidate article URLs through NewsAPI
//! 2. **Fetching**: Download and parse each page (bounded concurrency, retries)
//! 3. **Processing**: Summarize, extract topics, and score sentiment per article
//! 4. **Comparing**: Sentiment distribution and topic overlap across articles
//! 5. **Concluding**: Verdict text, translated and spoken as base64 MP3

use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod comparative;
mod config;
mod errors;
mod models;
mod nlp;
mod outputs;
mod pipeline;
mod scrapers;
mod server;
mod speech;
mod utils;
mod verdict;

use cli::{Cli, Command};
use config::Settings;
use pipeline::{Capabilities, Pipeline};
use server::{AppState, build_router};
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("company_news_digest starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.command, "Parsed CLI arguments");

    let settings = Settings::load(args.config.as_deref().map(Path::new))?
        .with_overrides(args.news_api_key.clone());
    if settings.news.api_key.is_none() {
        warn!("No NewsAPI key configured; searches will fail (set NEWS_API_KEY or news.api_key)");
    }

    let capabilities = Capabilities::from_settings(&settings)?;
    let pipeline = Arc::new(Pipeline::new(capabilities, settings));
    info!(
        max_articles = pipeline.settings().max_articles,
        concurrency = pipeline.settings().concurrency,
        narration = pipeline.settings().narration.enabled,
        "Pipeline initialized"
    );

    match args.command {
        Command::Serve { bind } => {
            let app = build_router(AppState { pipeline });
            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!(%bind, "Listening");
            axum::serve(listener, app).await?;
        }
        Command::Analyze {
            company,
            json_output_dir,
        } => {
            // Early check: ensure JSON output dir is writable
            if let Some(dir) = json_output_dir.as_deref() {
                if let Err(e) = ensure_writable_dir(dir).await {
                    error!(
                        path = %dir,
                        error = %e,
                        "JSON output directory is not writable (fix perms or choose a different path)"
                    );
                    return Err(e);
                }
            }

            let result = pipeline.analyze(&company).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if let Some(dir) = json_output_dir.as_deref() {
                if let Err(e) = outputs::json::write_analysis(&result, dir).await {
                    error!(error = %e, "Failed to write analysis JSON");
                }
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
