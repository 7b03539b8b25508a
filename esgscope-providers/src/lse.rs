use async_trait::async_trait;
use esgscope_core::connector::{EsgConnector, EsgProvider, finish};
use esgscope_core::{EsgError, EsgResult, Exchange, LookupOutcome, MetricRecord, MetricValue, Ticker};
use scraper::Html;
use url::Url;

use crate::http::{get_text, join};
use crate::scrape::first_text;

const SOURCE: &str = "London Stock Exchange";

/// London Stock Exchange ESG pages (`/stock/{symbol}/esg`).
pub struct LseConnector {
    client: reqwest::Client,
    base: Url,
}

impl LseConnector {
    /// Public site root.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.londonstockexchange.com/";

    /// Create a connector against `base`.
    #[must_use]
    pub const fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    pub(crate) fn parse(html: &str, symbol: &str) -> Result<EsgResult, EsgError> {
        let doc = Html::parse_document(html);
        let company = first_text(&doc, "h1.company-name")?.unwrap_or_else(|| symbol.to_string());

        let mut metrics = Vec::new();
        if let Some(raw) = first_text(&doc, "div.esg-rating")? {
            metrics.push(MetricRecord::new("ESG Rating", MetricValue::parse(&raw), SOURCE));
        }
        if let Some(raw) = first_text(&doc, "div.ftse4good-rating")? {
            metrics.push(MetricRecord::new("FTSE4Good", MetricValue::parse(&raw), SOURCE));
        }
        Ok(EsgResult::new(company, metrics))
    }

    async fn try_fetch(&self, ticker: &Ticker) -> Result<EsgResult, EsgError> {
        let symbol = ticker.base_symbol();
        let url = join(self.name(), &self.base, &format!("stock/{symbol}/esg"))?;
        let html = get_text(&self.client, self.name(), &format!("esg for {ticker}"), url).await?;
        Self::parse(&html, symbol)
    }
}

#[async_trait]
impl EsgProvider for LseConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "esgscope_providers::lse::fetch", skip(self), fields(ticker = %ticker))
    )]
    async fn fetch(&self, ticker: &Ticker) -> LookupOutcome {
        finish(self.name(), self.try_fetch(ticker).await)
    }
}

impl EsgConnector for LseConnector {
    fn name(&self) -> &'static str {
        "london-stock-exchange"
    }

    fn vendor(&self) -> &'static str {
        SOURCE
    }

    fn supports_exchange(&self, exchange: Exchange) -> bool {
        exchange == Exchange::London
    }

    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        Some(self as &dyn EsgProvider)
    }
}
