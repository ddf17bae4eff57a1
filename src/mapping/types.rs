//! Mapping result types

use crate::types::JsonObject;

/// Why a field was left out of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The header has no column with the field's label
    MissingColumn,
    /// The column exists but the row is too short to reach it
    ColumnOutOfBounds {
        /// Column position from the header
        position: usize,
        /// Number of cells in the row
        row_len: usize,
    },
    /// A numeric field whose text does not parse as a number
    InvalidNumber {
        /// Cell text
        raw: String,
    },
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn => write!(f, "no column with this label"),
            Self::ColumnOutOfBounds { position, row_len } => {
                write!(f, "column {position} is past the end of a {row_len}-cell row")
            }
            Self::InvalidNumber { raw } => write!(f, "'{raw}' is not a number"),
        }
    }
}

/// A field that could not be mapped for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMappingFailure {
    /// Position of the field in the schema
    pub field_index: usize,
    /// Attribute name of the field
    pub attribute_name: String,
    /// Column label of the field
    pub label: String,
    /// Record number of the row
    pub row_number: usize,
    /// The row's cells
    pub row: Vec<String>,
    /// What went wrong
    pub reason: FailureReason,
}

impl std::fmt::Display for FieldMappingFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {} field {} '{}' (label '{}'): {}",
            self.row_number, self.field_index, self.attribute_name, self.label, self.reason
        )
    }
}

/// A mapped row: the record plus any fields that were skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedRecord {
    /// Attribute name to coerced value, in schema order
    pub record: JsonObject,
    /// Fields missing from `record`, with the reason
    pub failures: Vec<FieldMappingFailure>,
}

impl MappedRecord {
    /// Whether every declared field made it into the record
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
