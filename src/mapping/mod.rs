//! Record mapping module
//!
//! Turns a decoded CSV row into a record keyed by schema attribute names.
//! Each declared field is looked up by its label in the header index and
//! coerced by its declared type. Numeric fields become floats when the text
//! contains a "." and integers otherwise; every other type stays text.
//!
//! Problems with a single field never fail the row. They come back as
//! [`FieldMappingFailure`] values next to the (partial) record.

mod mapper;
mod types;

pub use mapper::{coerce_number, RecordMapper};
pub use types::{FailureReason, FieldMappingFailure, MappedRecord};
