use esgscope_core::{EsgError, EsgResult, LookupOutcome, Ticker};

/// Classify one stage's outcome: a usable result, or the error to record.
///
/// A `Found` result without metrics is malformed and is recorded as a
/// `Data` failure so the chain moves on.
pub fn accept(connector: &str, outcome: LookupOutcome) -> Result<EsgResult, EsgError> {
    match outcome {
        LookupOutcome::Found(r) if r.is_malformed() => Err(EsgError::Data(format!(
            "{connector} returned an empty result for {}",
            r.company
        ))),
        LookupOutcome::Found(r) => Ok(r),
        LookupOutcome::Unavailable(e) => Err(crate::core::tag_err(connector, e)),
    }
}

/// Terminal outcome when every stage failed.
///
/// Always `Unavailable(ExhaustedFallback)`, whose reason is the stable
/// `"ESG data not found"` string, with the individual failures kept in order.
pub fn exhausted(ticker: &Ticker, attempts: Vec<EsgError>) -> LookupOutcome {
    LookupOutcome::Unavailable(EsgError::exhausted(ticker.as_str(), attempts))
}

/// Error recorded for a connector that is registered without an ESG capability.
pub fn unimplemented(connector: &str) -> EsgError {
    EsgError::connector(connector, "ESG lookup not implemented")
}
