//! Generic HTML article extractor.
//!
//! Works on arbitrary news pages: the title comes from `<title>`, the body
//! from every `<p>` element, and the summary hint from
//! `<meta name="description">`.

use super::ArticleExtractor;
use crate::config::FetchSettings;
use crate::errors::ExtractError;
use crate::models::ExtractedPage;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

pub const TITLE_NOT_FOUND: &str = "Title not found";

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());

/// Fetches pages over HTTP with a browser User-Agent and a request timeout.
#[derive(Debug, Clone)]
pub struct HtmlArticleExtractor {
    client: Client,
}

impl HtmlArticleExtractor {
    pub fn new(settings: &FetchSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ArticleExtractor for HtmlArticleExtractor {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn extract(&self, url: &str) -> Result<ExtractedPage, ExtractError> {
        let parsed = Url::parse(url).map_err(|e| ExtractError::InvalidUrl(e.to_string()))?;
        let body = self
            .client
            .get(parsed)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(bytes = body.len(), "Downloaded article page");

        let page = parse_article_html(url, &body)?;
        info!(
            title = %page.title,
            body_bytes = page.body.len(),
            has_description = page.description.is_some(),
            "Parsed article"
        );
        Ok(page)
    }
}

/// Extract title, paragraph text, and meta description from an HTML document.
///
/// Fails with [`ExtractError::NoContent`] when the page has no paragraph text.
pub fn parse_article_html(url: &str, html: &str) -> Result<ExtractedPage, ExtractError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());

    let body = document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");

    if body.trim().is_empty() {
        return Err(ExtractError::NoContent);
    }

    let description = document
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    Ok(ExtractedPage {
        url: url.to_string(),
        title,
        body,
        description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>  Tesla beats estimates  </title>
            <meta name="description" content="Tesla posted record deliveries.">
          </head>
          <body>
            <p>Tesla reported record deliveries.</p>
            <div>Navigation</div>
            <p>Shares rose <b>5%</b> in early trading.</p>
          </body>
        </html>"#;

    #[test]
    fn test_parse_full_page() {
        let page = parse_article_html("https://example.com/a", PAGE).unwrap();
        assert_eq!(page.title, "Tesla beats estimates");
        assert_eq!(
            page.body,
            "Tesla reported record deliveries. Shares rose 5% in early trading."
        );
        assert_eq!(page.description.as_deref(), Some("Tesla posted record deliveries."));
        assert_eq!(page.url, "https://example.com/a");
    }

    #[test]
    fn test_missing_title_and_description() {
        let html = "<html><body><p>Only a paragraph.</p></body></html>";
        let page = parse_article_html("https://example.com/b", html).unwrap();
        assert_eq!(page.title, TITLE_NOT_FOUND);
        assert!(page.description.is_none());
    }

    #[test]
    fn test_empty_description_is_ignored() {
        let html = r#"<html><head><meta name="description" content="  "></head><body><p>Text.</p></body></html>"#;
        let page = parse_article_html("https://example.com/c", html).unwrap();
        assert!(page.description.is_none());
    }

    #[test]
    fn test_no_paragraphs_is_no_content() {
        let html = "<html><head><title>Empty</title></head><body><div>nothing</div></body></html>";
        let err = parse_article_html("https://example.com/d", html).unwrap_err();
        assert!(matches!(err, ExtractError::NoContent));
    }

    #[tokio::test]
    async fn test_invalid_url_rejected_before_request() {
        let extractor = HtmlArticleExtractor::new(&FetchSettings::default()).unwrap();
        let err = extractor.extract("not a url").await.unwrap_err();
        assert!(matches!(err, ExtractError::InvalidUrl(_)));
    }
}
