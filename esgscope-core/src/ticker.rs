use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EsgError;

/// Exchange-qualified ticker symbol, e.g. `MAYBANK.KL` or `RIO.L`.
///
/// Treated as opaque apart from the optional dotted suffix. Construction trims
/// surrounding whitespace and rejects empty symbols or inner whitespace; the
/// original casing is preserved for display and upstream requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse a ticker symbol.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the symbol is empty, contains whitespace,
    /// or starts/ends with a dot.
    pub fn new(raw: &str) -> Result<Self, EsgError> {
        let t = raw.trim();
        if t.is_empty() {
            return Err(EsgError::InvalidArg("ticker must not be empty".into()));
        }
        if t.chars().any(char::is_whitespace) {
            return Err(EsgError::InvalidArg(format!(
                "ticker '{t}' must not contain whitespace"
            )));
        }
        if t.starts_with('.') || t.ends_with('.') {
            return Err(EsgError::InvalidArg(format!("ticker '{t}' is malformed")));
        }
        Ok(Self(t.to_string()))
    }

    /// The symbol as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercased symbol, used for case-insensitive suffix matching.
    #[must_use]
    pub fn upper(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// Everything before the first `.`; the whole symbol when there is no suffix.
    #[must_use]
    pub fn base_symbol(&self) -> &str {
        self.0.split_once('.').map_or(self.0.as_str(), |(b, _)| b)
    }

    /// The dotted suffix after the last `.`, without the dot.
    #[must_use]
    pub fn suffix(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, s)| s)
    }

    /// Symbol with the given dotted suffix removed (case-insensitive).
    #[must_use]
    pub fn strip_suffix(&self, suffix: &str) -> &str {
        let Some(cut) = self.0.len().checked_sub(suffix.len()).filter(|&c| c > 0) else {
            return &self.0;
        };
        // `get` is `None` when `cut` falls inside a multi-byte character.
        match (self.0.get(..cut), self.0.get(cut..)) {
            (Some(head), Some(tail)) if tail.eq_ignore_ascii_case(suffix) => head,
            _ => &self.0,
        }
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = EsgError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl std::str::FromStr for Ticker {
    type Err = EsgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
