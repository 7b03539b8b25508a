use std::collections::HashMap;
use std::sync::Arc;

use crate::connector::EsgConnector;
use crate::{CountryCode, EsgError};

/// Country-keyed map of ESG connectors.
///
/// Built once at startup and read-only afterwards. Lookups return clones of
/// the same `Arc`, so repeated lookups for a country observe one instance.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    entries: HashMap<CountryCode, Arc<dyn EsgConnector>>,
    order: Vec<CountryCode>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut m = f.debug_map();
        for c in &self.order {
            if let Some(p) = self.entries.get(c) {
                m.entry(&c.as_str(), &p.name());
            }
        }
        m.finish()
    }
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `provider` as the primary source for `country`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the country already has a provider.
    pub fn register(
        &mut self,
        country: CountryCode,
        provider: Arc<dyn EsgConnector>,
    ) -> Result<(), EsgError> {
        if self.entries.contains_key(&country) {
            return Err(EsgError::InvalidArg(format!(
                "country {country} already has a registered provider"
            )));
        }
        self.order.push(country.clone());
        self.entries.insert(country, provider);
        Ok(())
    }

    /// Build a registry from the configured country list.
    ///
    /// `resolve` maps a country to its connector; countries it returns `None`
    /// for are omitted without failing. Duplicate countries keep the first entry.
    pub fn from_catalog<F>(countries: &[CountryCode], mut resolve: F) -> Self
    where
        F: FnMut(&CountryCode) -> Option<Arc<dyn EsgConnector>>,
    {
        let mut reg = Self::new();
        for country in countries {
            match resolve(country) {
                Some(provider) => {
                    if reg.register(country.clone(), provider).is_err() {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(country = %country, "duplicate country in catalog; keeping first");
                    }
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(country = %country, "no provider implementation; skipping");
                }
            }
        }
        reg
    }

    /// Look up the provider for `country`.
    #[must_use]
    pub fn lookup(&self, country: &CountryCode) -> Option<Arc<dyn EsgConnector>> {
        self.entries.get(country).cloned()
    }

    /// Registered countries in registration order.
    #[must_use]
    pub fn countries(&self) -> &[CountryCode] {
        &self.order
    }

    /// Number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no provider is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
