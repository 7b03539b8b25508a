use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use esgscope_core::connector::{ConnectorKey, EsgConnector};
use esgscope_core::{
    CountryCode, EsgConfig, EsgError, FetchStrategy, LookupOutcome, ProviderRegistry, Ticker,
    detect,
};

/// Resolver that dispatches lookups to country providers and walks the
/// fallback chain.
pub struct EsgScope {
    pub(crate) registry: ProviderRegistry,
    pub(crate) fallbacks: Vec<Arc<dyn EsgConnector>>,
    pub(crate) provider_timeout: Duration,
    pub(crate) fetch_strategy: FetchStrategy,
}

/// Builder for constructing an [`EsgScope`].
pub struct EsgScopeBuilder {
    registry: ProviderRegistry,
    countries: Vec<(CountryCode, Arc<dyn EsgConnector>)>,
    fallbacks: Vec<Arc<dyn EsgConnector>>,
    provider_timeout: Duration,
    fetch_strategy: FetchStrategy,
}

impl Default for EsgScopeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EsgScopeBuilder {
    /// Create a builder with an empty registry and the default configuration
    /// (10s provider timeout, priority-with-fallback).
    #[must_use]
    pub fn new() -> Self {
        let cfg = EsgConfig::default();
        Self {
            registry: ProviderRegistry::new(),
            countries: Vec::new(),
            fallbacks: Vec::new(),
            provider_timeout: cfg.provider_timeout(),
            fetch_strategy: cfg.fetch_strategy,
        }
    }

    /// Use a registry built elsewhere, typically from the configured catalog.
    ///
    /// Countries added with [`with_country`](Self::with_country) are registered
    /// on top of it at build time.
    #[must_use]
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register the primary connector for a country.
    #[must_use]
    pub fn with_country(mut self, country: CountryCode, c: Arc<dyn EsgConnector>) -> Self {
        self.countries.push((country, c));
        self
    }

    /// Append a fallback connector.
    ///
    /// Fallbacks are tried in registration order after the primary, and only
    /// for exchanges they declare support for. Registering the same connector
    /// key twice keeps the first position.
    #[must_use]
    pub fn with_fallback(mut self, c: Arc<dyn EsgConnector>) -> Self {
        self.fallbacks.push(c);
        self
    }

    /// Set the per-provider call timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    /// Select how the chain is executed.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.fetch_strategy = strategy;
        self
    }

    /// Apply timeout and strategy from a loaded configuration.
    #[must_use]
    pub const fn config(mut self, cfg: &EsgConfig) -> Self {
        self.provider_timeout = cfg.provider_timeout();
        self.fetch_strategy = cfg.fetch_strategy;
        self
    }

    /// Build the resolver.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a country is registered twice, if the timeout
    /// is zero, or if no provider was registered at all.
    pub fn build(self) -> Result<EsgScope, EsgError> {
        let mut registry = self.registry;
        for (country, c) in self.countries {
            registry.register(country, c)?;
        }

        let mut seen: HashSet<ConnectorKey> = HashSet::new();
        let fallbacks: Vec<Arc<dyn EsgConnector>> = self
            .fallbacks
            .into_iter()
            .filter(|c| seen.insert(c.key()))
            .collect();

        if self.provider_timeout.is_zero() {
            return Err(EsgError::InvalidArg(
                "provider timeout must be greater than zero".to_string(),
            ));
        }
        if registry.is_empty() && fallbacks.is_empty() {
            return Err(EsgError::InvalidArg(
                "no providers registered; add a country provider or a fallback".to_string(),
            ));
        }

        Ok(EsgScope {
            registry,
            fallbacks,
            provider_timeout: self.provider_timeout,
            fetch_strategy: self.fetch_strategy,
        })
    }
}

/// Attribute a provider error to the connector that produced it.
///
/// Errors that already identify their origin or their kind are passed
/// through unchanged.
pub(crate) fn tag_err(connector: &str, e: EsgError) -> EsgError {
    match e {
        e @ (EsgError::NotFound { .. }
        | EsgError::Data(_)
        | EsgError::ProviderTimeout { .. }
        | EsgError::ProviderUnavailable { .. }
        | EsgError::Connector { .. }
        | EsgError::ExhaustedFallback { .. }) => e,
        other => EsgError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// One entry of the fallback chain.
pub(crate) enum Stage {
    /// A connector to call.
    Call(Arc<dyn EsgConnector>),
    /// The requested country has no registered provider.
    Missing(CountryCode),
}

impl EsgScope {
    /// Start building a new resolver.
    #[must_use]
    pub fn builder() -> EsgScopeBuilder {
        EsgScopeBuilder::new()
    }

    /// Per-provider timeout in effect.
    #[must_use]
    pub const fn provider_timeout(&self) -> Duration {
        self.provider_timeout
    }

    /// Fetch strategy in effect.
    #[must_use]
    pub const fn fetch_strategy(&self) -> FetchStrategy {
        self.fetch_strategy
    }

    /// The registry of country providers.
    #[must_use]
    pub const fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Wrap a provider future with a timeout; expiry becomes `ProviderTimeout`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "esgscope::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<Fut>(
        connector_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> LookupOutcome
    where
        Fut: core::future::Future<Output = LookupOutcome>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            LookupOutcome::Unavailable(EsgError::provider_timeout(connector_name, "esg"))
        })
    }

    /// Build the ordered chain of stages for a lookup.
    ///
    /// The primary country is the explicit `country` when given, otherwise the
    /// country of the detected exchange. Fallbacks follow in registration
    /// order, filtered by exchange support; a connector appears at most once.
    pub(crate) fn stages(&self, country: Option<&CountryCode>, ticker: &Ticker) -> Vec<Stage> {
        let exchange = detect(ticker);
        let primary_country = country.cloned().or_else(|| exchange.country());

        let mut stages = Vec::new();
        let mut seen: HashSet<ConnectorKey> = HashSet::new();

        if let Some(pc) = primary_country {
            match self.registry.lookup(&pc) {
                Some(c) => {
                    seen.insert(c.key());
                    stages.push(Stage::Call(c));
                }
                // Only an explicitly requested country counts as a failed stage.
                None if country.is_some() => stages.push(Stage::Missing(pc)),
                None => {}
            }
        }

        for c in &self.fallbacks {
            if c.supports_exchange(exchange) && seen.insert(c.key()) {
                stages.push(Stage::Call(Arc::clone(c)));
            }
        }
        stages
    }

    /// Connector keys that a lookup would try, in order.
    ///
    /// Useful for diagnostics; performs no I/O.
    #[must_use]
    pub fn plan(&self, country: Option<&CountryCode>, ticker: &Ticker) -> Vec<ConnectorKey> {
        self.stages(country, ticker)
            .into_iter()
            .filter_map(|s| match s {
                Stage::Call(c) => Some(c.key()),
                Stage::Missing(_) => None,
            })
            .collect()
    }
}
