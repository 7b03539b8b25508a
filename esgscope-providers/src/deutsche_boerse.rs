use async_trait::async_trait;
use esgscope_core::connector::{EsgConnector, EsgProvider, finish};
use esgscope_core::{EsgError, EsgResult, Exchange, LookupOutcome, MetricRecord, MetricValue, Ticker};
use serde::Deserialize;
use url::Url;

use crate::http::{get_json, join};

const SOURCE: &str = "Deutsche Börse ESG";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EsgPayload {
    company_name: Option<String>,
    risk_score: Option<serde_json::Value>,
    last_updated: Option<String>,
    eu_taxonomy_alignment: Option<serde_json::Value>,
}

fn json_value(v: &serde_json::Value) -> Option<MetricValue> {
    match v {
        serde_json::Value::Number(n) => n.as_f64().map(MetricValue::Number),
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(MetricValue::parse(s)),
        _ => None,
    }
}

/// Deutsche Börse ESG API (`/api/esg/{symbol}`), serving XETRA, Frankfurt and Berlin listings.
pub struct DeutscheBoerseConnector {
    client: reqwest::Client,
    base: Url,
}

impl DeutscheBoerseConnector {
    /// Public API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://deutsche-boerse.com/";

    /// Create a connector against `base`.
    #[must_use]
    pub const fn new(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    fn to_result(p: EsgPayload) -> Result<EsgResult, EsgError> {
        let company = p
            .company_name
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| EsgError::Data("deutsche boerse payload missing companyName".into()))?;
        let risk = p
            .risk_score
            .as_ref()
            .and_then(json_value)
            .ok_or_else(|| EsgError::Data("deutsche boerse payload missing riskScore".into()))?;

        let mut risk = MetricRecord::new("ESG Risk Score", risk, SOURCE);
        risk.last_updated = p.last_updated.clone();
        let mut metrics = vec![risk];
        if let Some(v) = p.eu_taxonomy_alignment.as_ref().and_then(json_value) {
            let mut m = MetricRecord::new("EU Taxonomy Alignment", v, SOURCE);
            m.last_updated = p.last_updated;
            metrics.push(m);
        }
        Ok(EsgResult::new(company.trim(), metrics))
    }

    async fn try_fetch(&self, ticker: &Ticker) -> Result<EsgResult, EsgError> {
        let symbol = ticker.base_symbol();
        let url = join(self.name(), &self.base, &format!("api/esg/{symbol}"))?;
        let payload: EsgPayload =
            get_json(&self.client, self.name(), &format!("esg for {ticker}"), url).await?;
        Self::to_result(payload)
    }
}

#[async_trait]
impl EsgProvider for DeutscheBoerseConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "esgscope_providers::deutsche_boerse::fetch", skip(self), fields(ticker = %ticker))
    )]
    async fn fetch(&self, ticker: &Ticker) -> LookupOutcome {
        finish(self.name(), self.try_fetch(ticker).await)
    }
}

impl EsgConnector for DeutscheBoerseConnector {
    fn name(&self) -> &'static str {
        "deutsche-boerse"
    }

    fn vendor(&self) -> &'static str {
        SOURCE
    }

    fn supports_exchange(&self, exchange: Exchange) -> bool {
        exchange.is_german()
    }

    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        Some(self as &dyn EsgProvider)
    }
}
