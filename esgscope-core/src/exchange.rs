//! Suffix-based exchange detection.
//!
//! A ticker's dotted suffix identifies its listing venue. The table is
//! ordered and scanned front to back; the first suffix the uppercased ticker
//! ends with wins. Tickers without a recognized suffix resolve to
//! [`Exchange::Unknown`], which is a normal value rather than an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CountryCode;
use crate::ticker::Ticker;

/// Listing venue identified from a ticker suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Exchange {
    /// US listings routed to Yahoo Finance (`.US`).
    YahooUs,
    /// London Stock Exchange (`.L`).
    London,
    /// Toronto Stock Exchange (`.TO`).
    Toronto,
    /// Euronext Paris (`.PA`).
    EuronextParis,
    /// Euronext Brussels (`.BR`).
    EuronextBrussels,
    /// Euronext Amsterdam (`.AS`).
    EuronextAmsterdam,
    /// Euronext Lisbon (`.LS`).
    EuronextLisbon,
    /// Borsa Italiana (`.MI`).
    BorsaItaliana,
    /// Vienna Stock Exchange (`.VI`).
    Vienna,
    /// Berlin Stock Exchange (`.BE`).
    Berlin,
    /// Frankfurt Stock Exchange (`.F`).
    Frankfurt,
    /// XETRA (`.DE`).
    Xetra,
    /// Singapore Exchange (`.SG`, `.SI`).
    Singapore,
    /// Hong Kong Stock Exchange (`.HK`).
    HongKong,
    /// Shenzhen Stock Exchange (`.SZ`).
    Shenzhen,
    /// Shanghai Stock Exchange (`.SS`).
    Shanghai,
    /// Korea Exchange (`.KS`).
    Korea,
    /// KOSDAQ (`.KQ`).
    Kosdaq,
    /// Taiwan Stock Exchange (`.TW`).
    Taiwan,
    /// Tokyo Stock Exchange (`.T`).
    Tokyo,
    /// Tel Aviv Stock Exchange (`.TA`).
    TelAviv,
    /// Saudi Exchange (`.SA`).
    Saudi,
    /// Buenos Aires Stock Exchange (`.BA`).
    BuenosAires,
    /// Mexican Stock Exchange (`.MX`).
    Mexico,
    /// Indonesia Stock Exchange (`.JK`).
    Indonesia,
    /// National Stock Exchange of India (`.NS`).
    IndiaNse,
    /// Bombay Stock Exchange (`.BO`).
    IndiaBse,
    /// Australian Securities Exchange (`.AX`).
    Australia,
    /// New Zealand Exchange (`.NZ`).
    NewZealand,
    /// Bursa Malaysia (`.KL`, `.MY`).
    BursaMalaysia,
    /// No recognized suffix.
    Unknown,
}

/// Ordered suffix table. No entry is a suffix of a later entry, so the
/// first-match scan is unambiguous.
pub const SUFFIX_TABLE: &[(&str, Exchange)] = &[
    (".US", Exchange::YahooUs),
    (".L", Exchange::London),
    (".TO", Exchange::Toronto),
    (".PA", Exchange::EuronextParis),
    (".BR", Exchange::EuronextBrussels),
    (".AS", Exchange::EuronextAmsterdam),
    (".LS", Exchange::EuronextLisbon),
    (".MI", Exchange::BorsaItaliana),
    (".VI", Exchange::Vienna),
    (".BE", Exchange::Berlin),
    (".F", Exchange::Frankfurt),
    (".DE", Exchange::Xetra),
    (".SG", Exchange::Singapore),
    (".SI", Exchange::Singapore),
    (".HK", Exchange::HongKong),
    (".SZ", Exchange::Shenzhen),
    (".SS", Exchange::Shanghai),
    (".KS", Exchange::Korea),
    (".KQ", Exchange::Kosdaq),
    (".TW", Exchange::Taiwan),
    (".T", Exchange::Tokyo),
    (".TA", Exchange::TelAviv),
    (".SA", Exchange::Saudi),
    (".BA", Exchange::BuenosAires),
    (".MX", Exchange::Mexico),
    (".JK", Exchange::Indonesia),
    (".NS", Exchange::IndiaNse),
    (".BO", Exchange::IndiaBse),
    (".AX", Exchange::Australia),
    (".NZ", Exchange::NewZealand),
    (".KL", Exchange::BursaMalaysia),
    (".MY", Exchange::BursaMalaysia),
];

impl Exchange {
    /// Display name, e.g. `"London SE"` or `"Unknown Exchange"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YahooUs => "Yahoo Finance",
            Self::London => "London SE",
            Self::Toronto => "Toronto SE",
            Self::EuronextParis => "Euronext Paris",
            Self::EuronextBrussels => "Euronext Brussels",
            Self::EuronextAmsterdam => "Euronext Amsterdam",
            Self::EuronextLisbon => "Euronext Lisbon",
            Self::BorsaItaliana => "Borsa Italiana",
            Self::Vienna => "Vienna SE",
            Self::Berlin => "Berlin SE",
            Self::Frankfurt => "Frankfurt SE",
            Self::Xetra => "XETRA",
            Self::Singapore => "Singapore SGX",
            Self::HongKong => "Hong Kong SE",
            Self::Shenzhen => "Shenzhen SE",
            Self::Shanghai => "Shanghai SE",
            Self::Korea => "Korea SE",
            Self::Kosdaq => "KOSDAQ",
            Self::Taiwan => "Taiwan SE",
            Self::Tokyo => "Tokyo SE",
            Self::TelAviv => "Tel Aviv SE",
            Self::Saudi => "Saudi SE",
            Self::BuenosAires => "Buenos Aires SE",
            Self::Mexico => "Mexican SE",
            Self::Indonesia => "Indonesia SE",
            Self::IndiaNse => "India NSE",
            Self::IndiaBse => "India BSE",
            Self::Australia => "Australia ASX",
            Self::NewZealand => "New Zealand SE",
            Self::BursaMalaysia => "Bursa Malaysia",
            Self::Unknown => "Unknown Exchange",
        }
    }

    /// ISO-like code of the market the exchange belongs to.
    const fn country_str(self) -> Option<&'static str> {
        Some(match self {
            Self::YahooUs => "US",
            Self::London => "GB",
            Self::Toronto => "CA",
            Self::EuronextParis => "FR",
            Self::EuronextBrussels => "BE",
            Self::EuronextAmsterdam => "NL",
            Self::EuronextLisbon => "PT",
            Self::BorsaItaliana => "IT",
            Self::Vienna => "AT",
            Self::Berlin | Self::Frankfurt | Self::Xetra => "DE",
            Self::Singapore => "SG",
            Self::HongKong => "HK",
            Self::Shenzhen | Self::Shanghai => "CN",
            Self::Korea | Self::Kosdaq => "KR",
            Self::Taiwan => "TW",
            Self::Tokyo => "JP",
            Self::TelAviv => "IL",
            Self::Saudi => "SA",
            Self::BuenosAires => "AR",
            Self::Mexico => "MX",
            Self::Indonesia => "ID",
            Self::IndiaNse | Self::IndiaBse => "IN",
            Self::Australia => "AU",
            Self::NewZealand => "NZ",
            Self::BursaMalaysia => "MY",
            Self::Unknown => return None,
        })
    }

    /// Country whose provider is primary for listings on this exchange.
    ///
    /// `None` for [`Exchange::Unknown`].
    #[must_use]
    pub fn country(self) -> Option<CountryCode> {
        self.country_str().and_then(|c| CountryCode::new(c).ok())
    }

    /// True for the German venues served by Deutsche Börse.
    #[must_use]
    pub const fn is_german(self) -> bool {
        matches!(self, Self::Berlin | Self::Frankfurt | Self::Xetra)
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identify the listing venue of `ticker` from its suffix.
///
/// Matching is case-insensitive; unrecognized suffixes (or none at all)
/// yield [`Exchange::Unknown`].
#[must_use]
pub fn detect(ticker: &Ticker) -> Exchange {
    let upper = ticker.upper();
    SUFFIX_TABLE
        .iter()
        .find(|(suffix, _)| upper.ends_with(suffix))
        .map_or(Exchange::Unknown, |(_, ex)| *ex)
}
