//! Annual report download and text extraction.

use anyhow::{Context, anyhow};
use scraper::{Html, Node};
use url::Url;

/// Characters of report text sent for analysis.
pub const REPORT_CHAR_LIMIT: usize = 15_000;

const CONNECTOR: &str = "annual-report";

/// How a downloaded report is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// PDF document.
    Pdf,
    /// Anything else is read as an HTML page.
    Html,
}

impl ReportFormat {
    /// A `.pdf` path or a `%PDF-` header selects PDF.
    #[must_use]
    pub fn detect(url: &Url, body: &[u8]) -> Self {
        if url.path().to_ascii_lowercase().ends_with(".pdf") || body.starts_with(b"%PDF-") {
            Self::Pdf
        } else {
            Self::Html
        }
    }
}

/// Visible text of an HTML page with whitespace collapsed; script and style
/// contents are skipped.
#[must_use]
pub fn html_text(body: &str) -> String {
    let doc = Html::parse_document(body);
    let mut words: Vec<&str> = Vec::new();
    for node in doc.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(|a| a.value().as_element())
            .any(|e| matches!(e.name(), "script" | "style" | "noscript"));
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}

/// Text layer of a PDF document.
///
/// # Errors
/// Fails when the document cannot be parsed.
pub async fn pdf_text(bytes: Vec<u8>) -> anyhow::Result<String> {
    // The extractor is synchronous and may panic on damaged files; a panic
    // surfaces as a join error.
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| anyhow!("pdf extraction aborted: {e}"))?
        .context("extracting pdf text")
}

/// The first `limit` characters of `text`.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    text.char_indices().nth(limit).map_or(text, |(i, _)| &text[..i])
}

/// Download a report and return its text, capped at [`REPORT_CHAR_LIMIT`].
///
/// # Errors
/// Fails on an invalid URL, a failed download, an unreadable document, or a
/// report without any text.
#[tracing::instrument(name = "esgscope_cli::report::fetch_report_text", skip(client))]
pub async fn fetch_report_text(client: &reqwest::Client, raw_url: &str) -> anyhow::Result<String> {
    let url = Url::parse(raw_url.trim()).with_context(|| format!("invalid report url '{raw_url}'"))?;
    let body = esgscope_providers::http::get_bytes(client, CONNECTOR, raw_url, url.clone()).await?;
    let text = match ReportFormat::detect(&url, &body) {
        ReportFormat::Pdf => pdf_text(body).await?,
        ReportFormat::Html => html_text(&String::from_utf8_lossy(&body)),
    };
    let text = truncate_chars(text.trim(), REPORT_CHAR_LIMIT);
    if text.is_empty() {
        return Err(anyhow!("report at {raw_url} contained no text"));
    }
    tracing::debug!(chars = text.chars().count(), "report text extracted");
    Ok(text.to_string())
}
