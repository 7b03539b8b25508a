//! Country/market identifiers used as registry keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EsgError;

/// Short ISO-like market identifier (e.g. `MY`, `DE`, `US`).
///
/// Codes are 2 or 3 ASCII alphanumerics and are normalized to uppercase on
/// construction, so `"my"` and `"MY"` name the same registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse and normalize a country code.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the trimmed input is not 2–3 ASCII alphanumerics.
    pub fn new(code: &str) -> Result<Self, EsgError> {
        let trimmed = code.trim();
        let valid_len = (2..=3).contains(&trimmed.len());
        if !valid_len || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EsgError::InvalidArg(format!(
                "invalid country code '{code}': expected 2-3 alphanumeric characters"
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the normalized code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CountryCode {
    type Error = EsgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for CountryCode {
    type Err = EsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
