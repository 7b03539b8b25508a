use async_trait::async_trait;

pub use esgscope_types::ConnectorKey;

use crate::exchange::Exchange;
use crate::ticker::Ticker;
use crate::{EsgError, LookupOutcome};

/// Focused role trait for connectors that provide ESG data.
///
/// Implementations must not panic or propagate errors: every failure is
/// reported as [`LookupOutcome::Unavailable`]. Partial results (only some
/// metrics populated) are allowed.
#[async_trait]
pub trait EsgProvider: Send + Sync {
    /// Fetch ESG metrics for the given ticker.
    async fn fetch(&self, ticker: &Ticker) -> LookupOutcome;
}

/// Base trait for all esgscope connectors.
///
/// A connector identifies itself, declares which exchanges it can serve when
/// used as a fallback, and advertises capabilities through accessor methods.
/// A connector that returns `None` from [`EsgConnector::as_esg_provider`] is
/// registered but not yet implemented; the resolver treats it as unavailable.
pub trait EsgConnector: Send + Sync {
    /// A stable identifier used for de-duplication and attribution (e.g. "bursa-malaysia").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string, used as the metric `source`.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether this connector can serve listings on `exchange` as a fallback.
    ///
    /// Default: `false` for every exchange. Connectors must opt in explicitly.
    fn supports_exchange(&self, exchange: Exchange) -> bool {
        let _ = exchange;
        false
    }

    /// Advertise ESG capability by returning a usable trait object reference when supported.
    fn as_esg_provider(&self) -> Option<&dyn EsgProvider> {
        None
    }
}

/// Convert an internal fallible fetch into a provider outcome.
///
/// Successful results without metrics are downgraded to a `Data` error so a
/// malformed page never reads as a hit.
pub fn finish(connector: &'static str, res: Result<crate::EsgResult, EsgError>) -> LookupOutcome {
    match res {
        Ok(r) if r.is_malformed() => LookupOutcome::Unavailable(EsgError::Data(format!(
            "{connector} returned no metrics for {}",
            r.company
        ))),
        other => other.into(),
    }
}
