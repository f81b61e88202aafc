//! Benchmark statistics: turn per-threshold reference/contaminant read
//! counts into a cumulative precision/recall table.
//!
//! - [`stats`]: table construction, F-scores, average precision and the
//!   per-row report
//! - [`table`]: tab-separated output of the table

pub mod stats;
pub mod table;
