//! Startup configuration: YAML file, environment, and resolver assembly.

use std::path::{Path, PathBuf};

use anyhow::Context;
use esgscope::{EsgConfig, EsgError, EsgScope};
use esgscope_providers::Providers;

/// Configuration file used when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/countries.yaml";

/// Load the configuration.
///
/// An explicit path must exist. Without one, the default path is read when
/// present; otherwise built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<EsgConfig> {
    if let Some(path) = explicit {
        return EsgConfig::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()));
    }
    let default = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default.is_file() {
        EsgConfig::from_path(&default)
            .with_context(|| format!("loading configuration from {}", default.display()))
    } else {
        tracing::warn!(path = %default.display(), "configuration file not found; using built-in defaults");
        Ok(EsgConfig::default())
    }
}

/// Assemble the resolver: registry from the configured countries, then the
/// full fallback chain.
pub fn build_scope(cfg: &EsgConfig, providers: &Providers) -> Result<EsgScope, EsgError> {
    let registry = providers.registry(&cfg.countries);
    tracing::info!(
        configured = cfg.countries.len(),
        registered = registry.len(),
        "provider registry built"
    );
    providers
        .fallback_chain()
        .into_iter()
        .fold(
            EsgScope::builder().with_registry(registry).config(cfg),
            esgscope::EsgScopeBuilder::with_fallback,
        )
        .build()
}
