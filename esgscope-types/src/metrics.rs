//! Normalized ESG result types shared by providers, the resolver, and sinks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EsgError;

/// Value of a single ESG data point.
///
/// Frameworks disagree on scale (0–100 scores, letter ratings, risk bands),
/// so values are either numeric or free text and are never rescaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Numeric score.
    Number(f64),
    /// Textual rating (e.g. "AA", "Low Risk").
    Text(String),
}

impl MetricValue {
    /// Interpret scraped text: numbers become `Number`, everything else `Text`.
    ///
    /// Surrounding whitespace and a trailing `%` are ignored when detecting numbers.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let t = raw.trim();
        let numeric = t.strip_suffix('%').unwrap_or(t).trim().replace(',', "");
        numeric
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map_or_else(|| Self::Text(t.to_string()), Self::Number)
    }

    /// Returns the numeric value, if any.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// One normalized ESG data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Free-text category, e.g. "Environmental" or "ESG Risk Score".
    pub name: String,
    /// Score or rating as reported upstream.
    pub value: MetricValue,
    /// Upstream system that produced the value.
    pub source: String,
    /// Last-updated marker in whatever format the source uses.
    pub last_updated: Option<String>,
}

impl MetricRecord {
    /// Build a record without a last-updated marker.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<MetricValue>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            source: source.into(),
            last_updated: None,
        }
    }

    /// Attach a last-updated marker.
    #[must_use]
    pub fn updated(mut self, when: impl Into<String>) -> Self {
        self.last_updated = Some(when.into());
        self
    }
}

/// ESG data for one company as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgResult {
    /// Company name or identifier.
    pub company: String,
    /// Metric records in provider order.
    pub metrics: Vec<MetricRecord>,
}

impl EsgResult {
    /// Build a result for `company` with the given metrics.
    pub fn new(company: impl Into<String>, metrics: Vec<MetricRecord>) -> Self {
        Self {
            company: company.into(),
            metrics,
        }
    }

    /// A result without any metric records does not count as data.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Look up the first metric with the given name.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<&MetricRecord> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

/// Resolution of a lookup: data, or an explicit reason why there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LookupOutcome {
    /// A populated result.
    Found(EsgResult),
    /// No data; carries the cause.
    Unavailable(EsgError),
}

impl LookupOutcome {
    /// Shorthand for an `Unavailable` outcome.
    #[must_use]
    pub const fn unavailable(err: EsgError) -> Self {
        Self::Unavailable(err)
    }

    /// True when the outcome carries data.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Borrow the result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&EsgResult> {
        match self {
            Self::Found(r) => Some(r),
            Self::Unavailable(_) => None,
        }
    }

    /// Borrow the failure cause, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&EsgError> {
        match self {
            Self::Found(_) => None,
            Self::Unavailable(e) => Some(e),
        }
    }

    /// Human-readable failure reason, `None` for successful lookups.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    /// Convert back into a `Result` for `?`-style handling.
    ///
    /// # Errors
    /// Returns the carried error for `Unavailable` outcomes.
    pub fn into_result(self) -> Result<EsgResult, EsgError> {
        match self {
            Self::Found(r) => Ok(r),
            Self::Unavailable(e) => Err(e),
        }
    }
}

impl From<Result<EsgResult, EsgError>> for LookupOutcome {
    fn from(res: Result<EsgResult, EsgError>) -> Self {
        match res {
            Ok(r) => Self::Found(r),
            Err(e) => Self::Unavailable(e),
        }
    }
}
