//! Row to record mapping

use super::types::{FailureReason, FieldMappingFailure, MappedRecord};
use crate::decode::ColumnIndex;
use crate::schema::SchemaField;
use crate::types::{JsonObject, JsonValue};
use serde_json::Number;
use tracing::warn;

/// Maps decoded rows to typed records
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordMapper;

impl RecordMapper {
    /// Map one data row.
    ///
    /// Fields are visited in declared order. A field whose column is missing,
    /// out of range, or not numeric when it should be is left out of the
    /// record and reported in `failures`; the other fields are unaffected.
    pub fn map_row(
        row: &[String],
        row_number: usize,
        columns: &ColumnIndex,
        fields: &[SchemaField],
    ) -> MappedRecord {
        let mut record = JsonObject::new();
        let mut failures = Vec::new();

        for (field_index, field) in fields.iter().enumerate() {
            match map_field(row, columns, field) {
                Ok(value) => {
                    record.insert(field.attribute_name.clone(), value);
                }
                Err(reason) => {
                    let failure = FieldMappingFailure {
                        field_index,
                        attribute_name: field.attribute_name.clone(),
                        label: field.label.clone(),
                        row_number,
                        row: row.to_vec(),
                        reason,
                    };
                    warn!("Skipping field: {failure}; row: {:?}", failure.row);
                    failures.push(failure);
                }
            }
        }

        MappedRecord { record, failures }
    }
}

fn map_field(
    row: &[String],
    columns: &ColumnIndex,
    field: &SchemaField,
) -> std::result::Result<JsonValue, FailureReason> {
    let position = columns
        .position(&field.label)
        .ok_or(FailureReason::MissingColumn)?;
    let raw = row.get(position).ok_or(FailureReason::ColumnOutOfBounds {
        position,
        row_len: row.len(),
    })?;

    if field.declared_type.is_numeric() {
        coerce_number(raw)
    } else {
        Ok(JsonValue::String(raw.clone()))
    }
}

/// Text containing "." becomes a float, anything else an integer
pub fn coerce_number(raw: &str) -> std::result::Result<JsonValue, FailureReason> {
    let invalid = || FailureReason::InvalidNumber {
        raw: raw.to_string(),
    };

    if raw.contains('.') {
        let value: f64 = raw.parse().map_err(|_| invalid())?;
        return Number::from_f64(value)
            .map(JsonValue::Number)
            .ok_or_else(invalid);
    }

    if let Ok(value) = raw.parse::<i64>() {
        return Ok(JsonValue::from(value));
    }
    raw.parse::<u64>()
        .map(JsonValue::from)
        .map_err(|_| invalid())
}
