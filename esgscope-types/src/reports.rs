//! Report envelopes produced by the resolver for bulk consumers.

use serde::{Deserialize, Serialize};

use crate::metrics::LookupOutcome;

/// Outcome of resolving one ticker within a batch.
///
/// Carries the requested `ticker`, the exchange display name it was detected
/// on, and the terminal [`LookupOutcome`]. Export and UI layers consume these
/// in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgReport {
    /// Ticker as requested.
    pub ticker: String,
    /// Exchange display name from suffix detection.
    pub exchange: String,
    /// Terminal outcome for the ticker.
    pub outcome: LookupOutcome,
}

impl EsgReport {
    /// Company name when the lookup succeeded.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.outcome.result().map(|r| r.company.as_str())
    }
}
