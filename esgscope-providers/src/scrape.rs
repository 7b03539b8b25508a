//! HTML extraction helpers built on `scraper`.

use esgscope_core::EsgError;
use scraper::{ElementRef, Html, Selector};

/// Compile a CSS selector.
pub(crate) fn selector(css: &str) -> Result<Selector, EsgError> {
    Selector::parse(css).map_err(|_| EsgError::Other(format!("invalid selector '{css}'")))
}

/// Collected, whitespace-normalized text of an element.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first element matching `css`, if present and non-empty.
pub(crate) fn first_text(doc: &Html, css: &str) -> Result<Option<String>, EsgError> {
    let sel = selector(css)?;
    Ok(doc.select(&sel).map(text_of).find(|t| !t.is_empty()))
}

/// Retrieval date used as the last-updated marker by sources that publish none.
pub(crate) fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
