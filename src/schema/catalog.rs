//! Schema loading and catalog discovery

use super::types::StreamSchema;
use crate::error::{Error, Result, ResultExt};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

// ============================================================================
// Schema Catalog
// ============================================================================

/// Stream schemas keyed by stream id
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: BTreeMap<String, StreamSchema>,
}

impl SchemaCatalog {
    /// Create an empty schema catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `<stream_id>.json` file in a directory
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            Error::config(format!("Failed to read schema directory {}: {e}", dir.display()))
        })?;

        let mut catalog = Self::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stream_id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read schema file {}", path.display()))?;
            let schema: JsonValue = serde_json::from_str(&content).map_err(|e| {
                Error::schema(stream_id, format!("invalid JSON in {}: {e}", path.display()))
            })?;

            debug!("Loaded schema for stream {stream_id}");
            catalog.insert(StreamSchema::new(stream_id, schema));
        }

        Ok(catalog)
    }

    /// Add or replace a stream schema
    pub fn insert(&mut self, schema: StreamSchema) {
        self.schemas.insert(schema.stream_id.clone(), schema);
    }

    /// Add a stream schema
    #[must_use]
    pub fn with_schema(mut self, stream_id: impl Into<String>, schema: JsonValue) -> Self {
        self.insert(StreamSchema::new(stream_id, schema));
        self
    }

    /// Schema for a stream id. Lookup falls back to the lower-cased id,
    /// matching how schema files are named.
    pub fn get(&self, stream_id: &str) -> Result<&StreamSchema> {
        self.schemas
            .get(stream_id)
            .or_else(|| self.schemas.get(&stream_id.to_lowercase()))
            .ok_or_else(|| Error::schema(stream_id, "no schema file found"))
    }

    /// Iterate over schemas in stream-id order
    pub fn iter(&self) -> impl Iterator<Item = &StreamSchema> {
        self.schemas.values()
    }

    /// Number of schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schema is loaded
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Build a catalog with one selected entry per schema
    pub fn discover(&self) -> Catalog {
        Catalog {
            streams: self
                .schemas
                .values()
                .map(|schema| CatalogEntry::selected(&schema.stream_id, schema.schema.clone()))
                .collect(),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Stream catalog (discovery output, sync input)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog entries, in sync order
    pub streams: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load a catalog from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read catalog file {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid catalog JSON: {e}")))
    }

    /// Selected entries in catalog order
    pub fn selected_streams(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.streams.iter().filter(|entry| entry.is_selected())
    }

    /// Find an entry by stream id
    pub fn get(&self, tap_stream_id: &str) -> Option<&CatalogEntry> {
        self.streams
            .iter()
            .find(|entry| entry.tap_stream_id == tap_stream_id)
    }
}

/// One stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stream id used for lookup
    pub tap_stream_id: String,
    /// Stream name
    pub stream: String,
    /// JSON schema of the stream
    #[serde(default)]
    pub schema: JsonValue,
    /// Primary key attributes
    #[serde(default)]
    pub key_properties: Vec<String>,
    /// Breadcrumb metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl CatalogEntry {
    /// Create an entry whose root metadata marks it selected
    pub fn selected(stream_id: &str, schema: JsonValue) -> Self {
        let mut root = JsonObject::new();
        root.insert("selected".to_string(), JsonValue::Bool(true));

        Self {
            tap_stream_id: stream_id.to_string(),
            stream: stream_id.to_string(),
            schema,
            key_properties: Vec::new(),
            metadata: vec![MetadataEntry {
                breadcrumb: Vec::new(),
                metadata: root,
            }],
        }
    }

    /// Whether the stream is selected for sync.
    ///
    /// Root-breadcrumb metadata `selected` wins; otherwise the legacy
    /// `schema.selected` flag is honoured.
    pub fn is_selected(&self) -> bool {
        let root = self
            .metadata
            .iter()
            .find(|entry| entry.breadcrumb.is_empty())
            .and_then(|entry| entry.metadata.get("selected"))
            .and_then(JsonValue::as_bool);

        root.or_else(|| self.schema.get("selected").and_then(JsonValue::as_bool))
            .unwrap_or(false)
    }
}

/// Metadata attached to a breadcrumb path of a stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path into the schema; empty for the stream itself
    #[serde(default)]
    pub breadcrumb: Vec<String>,
    /// Metadata values
    #[serde(default)]
    pub metadata: JsonObject,
}
