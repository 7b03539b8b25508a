use async_trait::async_trait;
use esgscope_core::connector::{EsgConnector, EsgProvider, finish};
use esgscope_core::{EsgError, EsgResult, Exchange, LookupOutcome, MetricRecord, MetricValue, Ticker};
use scraper::Html;
use url::Url;

use crate::http::{get_text, join};
use crate::scrape::{first_text, today};

const SOURCE: &str = "Bursa Malaysia";

/// Bursa Malaysia company pages (`/market/company/{symbol}`).
///
/// Scores are published as `div.esg-env-score`, `div.esg-soc-score` and
/// `div.esg-gov-score`; any subset is accepted.
pub struct BursaConnector {
    client: reqwest::Client,
    base: Url,
}

impl BursaConnector {
    /// Public site root.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.bursamalaysia.com/";

    /// Create a connector against `base`.
    #[must_use]
    pub const fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    pub(crate) fn parse(html: &str) -> Result<EsgResult, EsgError> {
        let doc = Html::parse_document(html);
        let company = first_text(&doc, "h1.company-name")?
            .ok_or_else(|| EsgError::Data("bursa page has no company name".into()))?;

        let updated = today();
        let mut metrics = Vec::new();
        for (name, css) in [
            ("Environmental", "div.esg-env-score"),
            ("Social", "div.esg-soc-score"),
            ("Governance", "div.esg-gov-score"),
        ] {
            if let Some(raw) = first_text(&doc, css)? {
                metrics.push(
                    MetricRecord::new(name, MetricValue::parse(&raw), SOURCE).updated(updated.clone()),
                );
            }
        }
        Ok(EsgResult::new(company, metrics))
    }

    async fn try_fetch(&self, ticker: &Ticker) -> Result<EsgResult, EsgError> {
        let symbol = ticker.base_symbol();
        let url = join(self.name(), &self.base, &format!("market/company/{symbol}"))?;
        let html = get_text(&self.client, self.name(), &format!("esg for {ticker}"), url).await?;
        Self::parse(&html)
    }
}

#[async_trait]
impl EsgProvider for BursaConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "esgscope_providers::bursa::fetch", skip(self), fields(ticker = %ticker))
    )]
    async fn fetch(&self, ticker: &Ticker) -> LookupOutcome {
        finish(self.name(), self.try_fetch(ticker).await)
    }
}

impl EsgConnector for BursaConnector {
    fn name(&self) -> &'static str {
        "bursa-malaysia"
    }

    fn vendor(&self) -> &'static str {
        SOURCE
    }

    fn supports_exchange(&self, exchange: Exchange) -> bool {
        exchange == Exchange::BursaMalaysia
    }

    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        Some(self as &dyn EsgProvider)
    }
}
