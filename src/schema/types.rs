//! Schema types
//!
//! A stream schema is a JSON-schema object whose `properties` map attribute
//! names to `{"type": ..., "label": ...}`. The label is the column header the
//! report download uses for that attribute.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Label whose column is created as a calendar date in warehouse tables
pub const DATE_ONLY_LABEL: &str = "Time Event Date";

/// Declared type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Integer,
    Number,
    String,
    Boolean,
}

impl FieldType {
    /// Resolve the declared type of a property.
    ///
    /// `type` may be a single name or a list such as `["null", "integer"]`;
    /// the first non-null entry wins.
    pub fn from_property(stream: &str, attribute: &str, property: &JsonValue) -> Result<Self> {
        let type_name = match property.get("type") {
            Some(JsonValue::String(name)) => name.as_str(),
            Some(JsonValue::Array(names)) => names
                .iter()
                .filter_map(JsonValue::as_str)
                .find(|name| *name != "null")
                .ok_or_else(|| {
                    Error::schema(stream, format!("property '{attribute}' has only a null type"))
                })?,
            _ => {
                return Err(Error::schema(
                    stream,
                    format!("property '{attribute}' has no type"),
                ))
            }
        };

        match type_name {
            "integer" => Ok(FieldType::Integer),
            "number" => Ok(FieldType::Number),
            "string" => Ok(FieldType::String),
            "boolean" => Ok(FieldType::Boolean),
            other => Err(Error::schema(
                stream,
                format!("property '{attribute}' has unsupported type '{other}'"),
            )),
        }
    }

    /// Whether values of this type are coerced to JSON numbers
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Number)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Integer => write!(f, "integer"),
            FieldType::Number => write!(f, "number"),
            FieldType::String => write!(f, "string"),
            FieldType::Boolean => write!(f, "boolean"),
        }
    }
}

/// One declared field of a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Attribute name in emitted records
    pub attribute_name: String,
    /// Column header in the report download
    pub label: String,
    /// Declared type
    pub declared_type: FieldType,
}

impl SchemaField {
    /// Create a schema field
    pub fn new(
        attribute_name: impl Into<String>,
        label: impl Into<String>,
        declared_type: FieldType,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            label: label.into(),
            declared_type,
        }
    }
}

/// The schema file of one stream
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSchema {
    /// Stream id (file stem)
    pub stream_id: String,
    /// Schema document as announced to the sink
    pub schema: JsonValue,
}

impl StreamSchema {
    /// Wrap a schema document
    pub fn new(stream_id: impl Into<String>, schema: JsonValue) -> Self {
        Self {
            stream_id: stream_id.into(),
            schema,
        }
    }

    /// The declared fields, in schema order.
    ///
    /// Every property must carry a `type` and a `label`.
    pub fn fields(&self) -> Result<Vec<SchemaField>> {
        let properties = self
            .schema
            .get("properties")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::schema(&self.stream_id, "schema has no properties object"))?;

        properties
            .iter()
            .map(|(attribute, property)| {
                let label = property
                    .get("label")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| {
                        Error::schema(
                            &self.stream_id,
                            format!("property '{attribute}' has no label"),
                        )
                    })?;
                let declared_type = FieldType::from_property(&self.stream_id, attribute, property)?;
                Ok(SchemaField::new(attribute.clone(), label, declared_type))
            })
            .collect()
    }
}
