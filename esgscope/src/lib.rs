//! esgscope resolves ESG metrics for a ticker across national data sources.
//!
//! Overview
//! - A [`ProviderRegistry`](esgscope_core::ProviderRegistry) maps country codes
//!   to the primary connector for that market.
//! - Fallback connectors are registered in priority order and declare which
//!   exchanges they can serve.
//! - [`EsgScope::resolve`] walks the chain `primary -> fallbacks`, bounding each
//!   call with a per-provider timeout, and returns the first populated result.
//!   When every stage fails the outcome is `Unavailable` with the reason
//!   `"ESG data not found"`.
//!
//! Fetch strategy
//! - `PriorityWithFallback`: one provider at a time, in chain order.
//! - `PriorityRace`: every stage starts at once; the highest-priority success
//!   still wins, so the outcome matches the sequential strategy.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use esgscope::EsgScope;
//!
//! let scope = EsgScope::builder()
//!     .with_country(CountryCode::new("MY")?, bursa.clone())
//!     .with_fallback(bursa)
//!     .with_fallback(yahoo)
//!     .build()?;
//!
//! let outcome = scope.resolve(None, &Ticker::new("MAYBANK.KL")?).await;
//! ```
#![warn(missing_docs)]

mod core;
/// Resolution entry points.
pub mod router;

pub use crate::core::{EsgScope, EsgScopeBuilder};
pub use esgscope_core::*;
