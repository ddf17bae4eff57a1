//! Report download decoder module
//!
//! # Overview
//!
//! Report snapshots download as comma-separated text. The decoder reads the
//! payload through an async reader with `csv_async`, turns the first record
//! into a [`ColumnIndex`] and yields the rest lazily. The payload is never
//! held in memory as a whole.

mod stream;
mod types;

pub use stream::{DecodedReport, ReportStreamDecoder};
pub use types::{ColumnIndex, DataRow};
