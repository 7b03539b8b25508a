//! esgscope-cli
//!
//! Interactive terminal over the esgscope resolver: single-ticker view, CSV
//! export, a cross-market comparison with an optional LLM summary, and LLM
//! analysis of annual reports.
#![warn(missing_docs)]

/// LLM summary of comparison tables.
pub mod analysis;
/// The menu loop.
pub mod app;
/// CSV export.
pub mod export;
/// Terminal tables.
pub mod render;
/// Annual report download and text extraction.
pub mod report;
/// Configuration loading and resolver assembly.
pub mod settings;

pub use app::App;
