//! Configuration types shared by the resolver, provider catalog, and CLI.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::country::CountryCode;
use crate::error::EsgError;

/// Countries listed when no configuration file is present.
const DEFAULT_COUNTRIES: &[&str] = &["MY", "DE", "GB", "JP", "SG", "IN", "US"];

/// Default bound for a single provider call.
const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

/// Strategy for walking the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Call strategies one after another and stop at the first success.
    #[default]
    PriorityWithFallback,
    /// Call every strategy concurrently, then return the highest-priority success.
    PriorityRace,
}

/// Global configuration for the `EsgScope` resolver.
///
/// Loaded once at startup; the resolver never re-reads it mid-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EsgConfig {
    /// Supported country codes, in the order they are registered.
    pub countries: Vec<CountryCode>,
    /// Timeout for an individual provider call, in milliseconds.
    pub provider_timeout_ms: u64,
    /// How the fallback chain is executed.
    pub fetch_strategy: FetchStrategy,
}

impl Default for EsgConfig {
    fn default() -> Self {
        Self {
            countries: DEFAULT_COUNTRIES
                .iter()
                .filter_map(|c| CountryCode::new(c).ok())
                .collect(),
            provider_timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
            fetch_strategy: FetchStrategy::default(),
        }
    }
}

impl EsgConfig {
    /// Per-provider timeout as a `Duration`.
    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Parse a YAML document such as:
    ///
    /// ```yaml
    /// countries: [MY, DE, GB]
    /// provider_timeout_ms: 5000
    /// ```
    ///
    /// # Errors
    /// Returns `Config` when the document is malformed, a country code is
    /// invalid, a code is listed twice, or the timeout is zero.
    pub fn from_yaml_str(doc: &str) -> Result<Self, EsgError> {
        let cfg: Self = serde_yaml::from_str(doc)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read or fails [`Self::from_yaml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EsgError> {
        let path = path.as_ref();
        let doc = std::fs::read_to_string(path)
            .map_err(|e| EsgError::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml_str(&doc)
    }

    fn validate(&self) -> Result<(), EsgError> {
        if self.provider_timeout_ms == 0 {
            return Err(EsgError::Config(
                "provider_timeout_ms must be greater than zero".into(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for c in &self.countries {
            if !seen.insert(c.as_str()) {
                return Err(EsgError::Config(format!("country {c} listed twice")));
            }
        }
        Ok(())
    }
}
