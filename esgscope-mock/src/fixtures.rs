//! Deterministic ESG results for well-known tickers.

use esgscope_core::{EsgResult, MetricRecord};

/// Bursa Malaysia page for Malayan Banking: environmental and social scores.
#[must_use]
pub fn maybank() -> EsgResult {
    EsgResult::new(
        "Malayan Banking Berhad",
        vec![
            MetricRecord::new("Environmental", 72.5, "Bursa Malaysia").updated("2025-01-15"),
            MetricRecord::new("Social", 68.0, "Bursa Malaysia").updated("2025-01-15"),
        ],
    )
}

/// London SE rating for Rio Tinto.
#[must_use]
pub fn rio_tinto() -> EsgResult {
    EsgResult::new(
        "Rio Tinto",
        vec![MetricRecord::new("ESG Rating", "AA", "London Stock Exchange")],
    )
}

/// Deutsche Börse risk score for SAP.
#[must_use]
pub fn sap() -> EsgResult {
    EsgResult::new(
        "SAP SE",
        vec![
            MetricRecord::new("ESG Risk Score", 12.4, "Deutsche Börse ESG").updated("2024-11-30"),
        ],
    )
}

/// Yahoo-style pillar scores keyed by ticker.
#[must_use]
pub fn yahoo_scores(ticker: &str) -> EsgResult {
    EsgResult::new(
        ticker,
        vec![
            MetricRecord::new("Environmental", 4.1, "Yahoo Finance"),
            MetricRecord::new("Social", 7.9, "Yahoo Finance"),
            MetricRecord::new("Governance", 5.3, "Yahoo Finance"),
        ],
    )
}
