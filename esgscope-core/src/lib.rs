//! esgscope-core
//!
//! Core types and traits shared across the esgscope workspace.
//!
//! - `ticker`: validated ticker symbols with optional exchange suffix.
//! - `exchange`: the suffix table and exchange detector.
//! - `connector`: the `EsgConnector` trait and the `EsgProvider` role trait.
//! - `registry`: country-keyed provider registry built once at startup.
#![warn(missing_docs)]

/// Connector capability traits and the primary `EsgConnector` interface.
pub mod connector;
/// Exchange suffix table and detection.
pub mod exchange;
/// Country code to provider registry.
pub mod registry;
/// Ticker symbol type.
pub mod ticker;

pub use connector::{EsgConnector, EsgProvider};
pub use exchange::{Exchange, detect};
pub use registry::ProviderRegistry;
pub use ticker::Ticker;

pub use esgscope_types::{
    ConnectorKey, CountryCode, EsgConfig, EsgError, EsgReport, EsgResult, FetchStrategy,
    LookupOutcome, MetricRecord, MetricValue,
};
