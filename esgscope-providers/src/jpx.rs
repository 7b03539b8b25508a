use async_trait::async_trait;
use esgscope_core::connector::{EsgConnector, EsgProvider, finish};
use esgscope_core::{EsgError, EsgResult, Exchange, LookupOutcome, MetricRecord, MetricValue, Ticker};
use scraper::Html;
use url::Url;

use crate::http::{get_text, join};
use crate::scrape::{first_text, selector, text_of, today};

const SOURCE: &str = "Tokyo Stock Exchange";

/// Japan Exchange Group ESG pages (`/english/listing/esg/{code}.html`).
///
/// The score sits in `table#esg-metrics`, in the cell following the
/// `Total Score` label.
pub struct JpxConnector {
    client: reqwest::Client,
    base: Url,
}

impl JpxConnector {
    /// Public site root.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.jpx.co.jp/";

    /// Create a connector against `base`.
    #[must_use]
    pub const fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    pub(crate) fn parse(html: &str, code: &str) -> Result<EsgResult, EsgError> {
        let doc = Html::parse_document(html);
        let company = first_text(&doc, "h1.company-name")?.unwrap_or_else(|| code.to_string());

        let cells = selector("table#esg-metrics td")?;
        let mut tds = doc.select(&cells).map(text_of);
        let total = tds
            .by_ref()
            .find(|t| t.eq_ignore_ascii_case("Total Score"))
            .and_then(|_| tds.next())
            .filter(|v| !v.is_empty());

        let metrics = total
            .map(|raw| {
                MetricRecord::new("JPX ESG Score", MetricValue::parse(&raw), SOURCE).updated(today())
            })
            .into_iter()
            .collect();
        Ok(EsgResult::new(company, metrics))
    }

    async fn try_fetch(&self, ticker: &Ticker) -> Result<EsgResult, EsgError> {
        let code = ticker.base_symbol();
        let url = join(self.name(), &self.base, &format!("english/listing/esg/{code}.html"))?;
        let html = get_text(&self.client, self.name(), &format!("esg for {ticker}"), url).await?;
        Self::parse(&html, code)
    }
}

#[async_trait]
impl EsgProvider for JpxConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "esgscope_providers::jpx::fetch", skip(self), fields(ticker = %ticker))
    )]
    async fn fetch(&self, ticker: &Ticker) -> LookupOutcome {
        finish(self.name(), self.try_fetch(ticker).await)
    }
}

impl EsgConnector for JpxConnector {
    fn name(&self) -> &'static str {
        "japan-exchange-group"
    }

    fn vendor(&self) -> &'static str {
        SOURCE
    }

    fn supports_exchange(&self, exchange: Exchange) -> bool {
        exchange == Exchange::Tokyo
    }

    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        Some(self as &dyn EsgProvider)
    }
}
