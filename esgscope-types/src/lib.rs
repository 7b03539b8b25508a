//! esgscope-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod connector;
mod country;
mod error;
mod metrics;
mod reports;

pub use config::{EsgConfig, FetchStrategy};
pub use connector::ConnectorKey;
pub use country::CountryCode;
pub use error::EsgError;
pub use metrics::{EsgResult, LookupOutcome, MetricRecord, MetricValue};
pub use reports::EsgReport;
