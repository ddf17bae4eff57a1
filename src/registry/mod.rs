//! Report registry
//!
//! Maps stream ids to the retrieval strategy that produces them. The table
//! is built once at startup and never mutated.
//!
//! # Overview
//!
//! - `ReportDescriptor` - remote report id and date-filter parameter of a
//!   snapshot-backed stream
//! - `StatsLevel` - aggregation level of a stats-backed stream
//! - `StreamKind` - the strategy chosen for a stream
//! - `ReportRegistry` - the read-only lookup table

mod types;

pub use types::{ReportDescriptor, ReportRegistry, StatsLevel, StreamKind};

#[cfg(test)]
mod tests;
