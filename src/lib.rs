//! Aggregation of regional pet records by administrative district.
//!
//! Three one-shot pipelines share the same core: records are loaded into
//! typed rows, filtered, keyed by district, tallied and shaped into a
//! fixed-order report that is written as a single spreadsheet.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod district;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod types;

pub use config::Config;
pub use error::{Result, StatsError};
pub use pipeline::{Pipeline, PipelineResult, RunStats};
