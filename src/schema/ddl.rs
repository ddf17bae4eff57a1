//! Warehouse table definitions for report streams

use super::types::{FieldType, SchemaField, DATE_ONLY_LABEL};

/// Column every report table is partitioned on
pub const PARTITION_COLUMN: &str = "event_date";

/// Warehouse column type of a declared field
pub fn warehouse_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Integer => "INT64",
        FieldType::Number => "FLOAT64",
        FieldType::String => "STRING",
        FieldType::Boolean => "BOOL",
    }
}

/// Column type of a field; the event date label always becomes `DATE`
pub fn column_type(field: &SchemaField) -> &'static str {
    if field.label == DATE_ONLY_LABEL {
        return "DATE";
    }
    warehouse_type(field.declared_type)
}

/// `CREATE TABLE` statement for one stream, columns in schema order
pub fn create_table_statement(dataset: &str, stream_id: &str, fields: &[SchemaField]) -> String {
    let columns: Vec<String> = fields
        .iter()
        .map(|field| format!("{} {}", field.attribute_name, column_type(field)))
        .collect();

    format!(
        "CREATE TABLE {dataset}.{stream_id} ({}) PARTITION BY {PARTITION_COLUMN};",
        columns.join(",")
    )
}
