use async_trait::async_trait;
use esgscope_core::connector::{EsgConnector, EsgProvider, finish};
use esgscope_core::{EsgError, EsgResult, Exchange, LookupOutcome, MetricRecord, MetricValue, Ticker};
use serde_json::{Map, Value};
use url::Url;

use crate::http::{get_json, join};

const SOURCE: &str = "Alpha Vantage";

const FIELDS: &[(&str, &str)] = &[
    ("ESG Score", "ESG Score"),
    ("Environmental Score", "Environmental"),
    ("Social Score", "Social"),
    ("Governance Score", "Governance"),
];

fn field_value(v: &Value) -> Option<MetricValue> {
    match v {
        Value::Number(n) => n.as_f64().map(MetricValue::Number),
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty() && !s.eq_ignore_ascii_case("N/A") && !s.eq_ignore_ascii_case("None"))
                .then(|| MetricValue::parse(s))
        }
        _ => None,
    }
}

/// Alpha Vantage `ESG_SCORE` endpoint. Generic last-resort source; needs an API key.
pub struct AlphaVantageConnector {
    client: reqwest::Client,
    base: Url,
    api_key: String,
}

impl AlphaVantageConnector {
    /// Public API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://www.alphavantage.co/";

    /// Create a connector against `base` using `api_key`.
    #[must_use]
    pub fn new(client: reqwest::Client, base: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base,
            api_key: api_key.into(),
        }
    }

    pub(crate) fn to_result(ticker: &Ticker, body: &Map<String, Value>) -> Result<EsgResult, EsgError> {
        if let Some(msg) = body.get("Error Message").and_then(Value::as_str) {
            return Err(EsgError::not_found(format!("esg for {ticker}: {msg}")));
        }
        if let Some(msg) = ["Note", "Information"]
            .iter()
            .find_map(|k| body.get(*k).and_then(Value::as_str))
        {
            return Err(EsgError::connector("alpha-vantage", format!("rate limit: {msg}")));
        }

        let company = body
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(ticker.as_str());
        let updated = body
            .get("Last Updated")
            .and_then(Value::as_str)
            .map(str::to_string);

        let metrics = FIELDS
            .iter()
            .filter_map(|(key, name)| {
                let value = body.get(*key).and_then(field_value)?;
                let mut m = MetricRecord::new(*name, value, SOURCE);
                m.last_updated.clone_from(&updated);
                Some(m)
            })
            .collect();
        Ok(EsgResult::new(company, metrics))
    }

    async fn try_fetch(&self, ticker: &Ticker) -> Result<EsgResult, EsgError> {
        let symbol = ticker.strip_suffix(".US");
        let mut url = join(self.name(), &self.base, "query")?;
        url.query_pairs_mut()
            .append_pair("function", "ESG_SCORE")
            .append_pair("symbol", symbol)
            .append_pair("apikey", &self.api_key);
        let body: Map<String, Value> =
            get_json(&self.client, self.name(), &format!("esg for {ticker}"), url).await?;
        Self::to_result(ticker, &body)
    }
}

#[async_trait]
impl EsgProvider for AlphaVantageConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "esgscope_providers::alpha_vantage::fetch", skip(self), fields(ticker = %ticker))
    )]
    async fn fetch(&self, ticker: &Ticker) -> LookupOutcome {
        finish(self.name(), self.try_fetch(ticker).await)
    }
}

impl EsgConnector for AlphaVantageConnector {
    fn name(&self) -> &'static str {
        "alpha-vantage"
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
