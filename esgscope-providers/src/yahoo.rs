use std::sync::Arc;

use async_trait::async_trait;
use esgscope_core::connector::{EsgConnector, EsgProvider, finish};
use esgscope_core::{EsgError, EsgResult, Exchange, LookupOutcome, MetricRecord, Ticker};

use crate::adapter::{RealAdapter, YahooScores, YfEsg};

const SOURCE: &str = "Yahoo Finance";

/// Yahoo Finance sustainability scores via `yfinance-rs`; serves every exchange.
pub struct YahooConnector {
    esg: Arc<dyn YfEsg>,
}

impl YahooConnector {
    /// Connector backed by the live Yahoo client.
    ///
    /// # Errors
    /// Returns `Config` if the client cannot be built.
    pub fn try_new(timeout: std::time::Duration) -> Result<Self, EsgError> {
        Ok(Self::from_esg_adapter(Arc::new(RealAdapter::try_new(timeout)?)))
    }

    /// Connector backed by an arbitrary adapter.
    #[must_use]
    pub fn from_esg_adapter(esg: Arc<dyn YfEsg>) -> Self {
        Self { esg }
    }

    /// Yahoo symbol for a ticker: `.US` listings are requested without suffix.
    fn symbol(ticker: &Ticker) -> String {
        ticker.strip_suffix(".US").to_ascii_uppercase()
    }

    fn to_result(ticker: &Ticker, s: YahooScores) -> EsgResult {
        let metrics = [
            ("Environmental", s.environmental),
            ("Social", s.social),
            ("Governance", s.governance),
        ]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| MetricRecord::new(name, v, SOURCE)))
        .collect();
        EsgResult::new(ticker.as_str(), metrics)
    }

    async fn try_fetch(&self, ticker: &Ticker) -> Result<EsgResult, EsgError> {
        let scores = self.esg.sustainability(&Self::symbol(ticker)).await?;
        Ok(Self::to_result(ticker, scores))
    }
}

#[async_trait]
impl EsgProvider for YahooConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "esgscope_providers::yahoo::fetch", skip(self), fields(ticker = %ticker))
    )]
    async fn fetch(&self, ticker: &Ticker) -> LookupOutcome {
        finish(self.name(), self.try_fetch(ticker).await)
    }
}

impl EsgConnector for YahooConnector {
    fn name(&self) -> &'static str {
        "yahoo-finance"
    }

    fn vendor(&self) -> &'static str {
        SOURCE
    }

    fn supports_exchange(&self, _exchange: Exchange) -> bool {
        true
    }

    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        Some(self as &dyn EsgProvider)
    }
}
