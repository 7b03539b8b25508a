use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the esgscope workspace.
///
/// Covers provider absence, retrieval/parse failures inside providers,
/// timeouts, and the terminal "every strategy failed" aggregate. Errors are
/// values: providers and the resolver convert them into
/// [`LookupOutcome::Unavailable`](crate::LookupOutcome::Unavailable) rather
/// than propagating them to callers.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EsgError {
    /// No provider implementation is registered for the requested country.
    #[error("no provider registered for country {country}")]
    ProviderUnavailable {
        /// Country code that had no registered provider.
        country: String,
    },

    /// Issues with the returned or expected data (missing fields, empty result, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// An individual connector failed while retrieving data.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// The upstream source has no data for the requested company.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "esg for RIO.L".
        what: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (always "esg" today).
        capability: String,
    },

    /// Every strategy in the fallback chain failed.
    ///
    /// The display string is the stable user-facing reason; the individual
    /// failures are kept in `attempts` in the order they were tried.
    #[error("ESG data not found")]
    ExhaustedFallback {
        /// Ticker that could not be resolved.
        ticker: String,
        /// Failures of each attempted strategy, in priority order.
        attempts: Vec<EsgError>,
    },
}

impl EsgError {
    /// Helper: build a `ProviderUnavailable` error for a country code.
    pub fn provider_unavailable(country: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            country: country.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build an `ExhaustedFallback` aggregate.
    pub fn exhausted(ticker: impl Into<String>, attempts: Vec<Self>) -> Self {
        Self::ExhaustedFallback {
            ticker: ticker.into(),
            attempts,
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Provider absence and benign not-found conditions are not actionable.
    /// Aggregates are classified based on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::ProviderUnavailable { .. } | Self::NotFound { .. } => false,
            Self::ExhaustedFallback { attempts, .. } => attempts.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `ExhaustedFallback` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::ExhaustedFallback { attempts, .. } => {
                attempts.into_iter().flat_map(Self::flatten).collect()
            }
            other => vec![other],
        }
    }
}

impl From<serde_yaml::Error> for EsgError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}
