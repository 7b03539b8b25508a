//! esgscope-providers
//!
//! Concrete ESG connectors for esgscope and the static catalog that maps
//! country codes to them.
//!
//! | country | connector | source |
//! |---------|-----------|--------|
//! | `MY` | [`BursaConnector`] | Bursa Malaysia company pages |
//! | `DE` | [`DeutscheBoerseConnector`] | Deutsche Börse ESG API |
//! | `GB` | [`LseConnector`] | London Stock Exchange ESG pages |
//! | `JP` | [`JpxConnector`] | JPX ESG pages |
//!
//! [`YahooConnector`] and [`AlphaVantageConnector`] have no home country;
//! they close the fallback chain for every exchange. Countries without an
//! entry (`SG`, `IN`, `US`) are registry gaps.
#![warn(missing_docs)]

/// Yahoo Finance adapter definitions and the production adapter backed by `yfinance-rs`.
pub mod adapter;
/// Shared HTTP helpers.
pub mod http;

mod alpha_vantage;
mod bursa;
mod deutsche_boerse;
mod jpx;
mod lse;
mod scrape;
mod yahoo;

use std::sync::Arc;
use std::time::Duration;

use esgscope_core::{CountryCode, EsgConnector, EsgError, ProviderRegistry};

pub use alpha_vantage::AlphaVantageConnector;
pub use bursa::BursaConnector;
pub use deutsche_boerse::DeutscheBoerseConnector;
pub use jpx::JpxConnector;
pub use lse::LseConnector;
pub use yahoo::YahooConnector;

/// Environment variables holding the Alpha Vantage key, in lookup order.
pub const ALPHA_VANTAGE_KEY_VARS: &[&str] = &["ALPHA_VANTAGE_API_KEY", "ALPHA_VANTAGE_KEY"];

/// Endpoints, credentials and timeouts for the built-in connectors.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Alpha Vantage API key; the connector is left out without one.
    pub alpha_vantage_key: Option<String>,
    /// Bursa Malaysia site root.
    pub bursa_url: String,
    /// Deutsche Börse API root.
    pub deutsche_boerse_url: String,
    /// London Stock Exchange site root.
    pub lse_url: String,
    /// JPX site root.
    pub jpx_url: String,
    /// Alpha Vantage API root.
    pub alpha_vantage_url: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_REQUEST_TIMEOUT,
            alpha_vantage_key: None,
            bursa_url: BursaConnector::DEFAULT_BASE_URL.to_string(),
            deutsche_boerse_url: DeutscheBoerseConnector::DEFAULT_BASE_URL.to_string(),
            lse_url: LseConnector::DEFAULT_BASE_URL.to_string(),
            jpx_url: JpxConnector::DEFAULT_BASE_URL.to_string(),
            alpha_vantage_url: AlphaVantageConnector::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ProviderSettings {
    /// Defaults, with the Alpha Vantage key taken from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Defaults, with the Alpha Vantage key taken from `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let alpha_vantage_key = ALPHA_VANTAGE_KEY_VARS
            .iter()
            .filter_map(|k| lookup(k))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty());
        Self {
            alpha_vantage_key,
            ..Self::default()
        }
    }
}

/// The built-in connectors, each constructed once and shared by `Arc`.
///
/// A connector that serves as a country primary is the same instance that
/// appears in the fallback chain, so the resolver de-duplicates it by key.
#[derive(Clone)]
pub struct Providers {
    bursa: Arc<BursaConnector>,
    deutsche_boerse: Arc<DeutscheBoerseConnector>,
    lse: Arc<LseConnector>,
    jpx: Arc<JpxConnector>,
    yahoo: Arc<YahooConnector>,
    alpha_vantage: Option<Arc<AlphaVantageConnector>>,
}

impl Providers {
    /// Construct every connector from `settings`.
    ///
    /// # Errors
    /// Returns `Config` if an HTTP client cannot be built or a base URL is invalid.
    pub fn new(settings: &ProviderSettings) -> Result<Self, EsgError> {
        let client = http::build_client(settings.request_timeout)?;
        let alpha_vantage = match &settings.alpha_vantage_key {
            Some(key) => Some(Arc::new(AlphaVantageConnector::new(
                client.clone(),
                http::base_url(&settings.alpha_vantage_url)?,
                key.clone(),
            ))),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("no Alpha Vantage key configured; leaving it out of the chain");
                None
            }
        };
        Ok(Self {
            bursa: Arc::new(BursaConnector::new(
                client.clone(),
                http::base_url(&settings.bursa_url)?,
            )),
            deutsche_boerse: Arc::new(DeutscheBoerseConnector::new(
                client.clone(),
                http::base_url(&settings.deutsche_boerse_url)?,
            )),
            lse: Arc::new(LseConnector::new(
                client.clone(),
                http::base_url(&settings.lse_url)?,
            )),
            jpx: Arc::new(JpxConnector::new(client, http::base_url(&settings.jpx_url)?)),
            yahoo: Arc::new(YahooConnector::try_new(settings.request_timeout)?),
            alpha_vantage,
        })
    }

    /// Swap the Yahoo connector, e.g. for one built on an injected adapter.
    #[must_use]
    pub fn with_yahoo(mut self, yahoo: YahooConnector) -> Self {
        self.yahoo = Arc::new(yahoo);
        self
    }

    /// Primary connector implemented for `country`, if any.
    #[must_use]
    pub fn catalog(&self, country: &CountryCode) -> Option<Arc<dyn EsgConnector>> {
        match country.as_str() {
            "MY" => Some(self.bursa.clone()),
            "DE" => Some(self.deutsche_boerse.clone()),
            "GB" => Some(self.lse.clone()),
            "JP" => Some(self.jpx.clone()),
            _ => None,
        }
    }

    /// Registry for the configured countries; gaps are left out.
    #[must_use]
    pub fn registry(&self, countries: &[CountryCode]) -> ProviderRegistry {
        ProviderRegistry::from_catalog(countries, |c| self.catalog(c))
    }

    /// Fallback chain in priority order: exchange scrapers, then Yahoo, then
    /// Alpha Vantage when a key is configured.
    #[must_use]
    pub fn fallback_chain(&self) -> Vec<Arc<dyn EsgConnector>> {
        let mut chain: Vec<Arc<dyn EsgConnector>> = vec![
            self.bursa.clone(),
            self.deutsche_boerse.clone(),
            self.lse.clone(),
            self.jpx.clone(),
            self.yahoo.clone(),
        ];
        if let Some(av) = &self.alpha_vantage {
            chain.push(av.clone());
        }
        chain
    }
}
