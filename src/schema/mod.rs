//! Schema module
//!
//! Loads per-stream JSON schemas, exposes their declared fields to the
//! record mapper, and builds the discovery catalog.
//!
//! # Features
//!
//! - **Schema Loading**: One `<stream_id>.json` file per stream
//! - **Field Declarations**: Ordered (attribute, label, type) triples
//! - **Catalog**: Discovery output and selection metadata
//! - **DDL**: Warehouse `CREATE TABLE` statements for report streams

mod catalog;
mod ddl;
mod types;

pub use catalog::{Catalog, CatalogEntry, MetadataEntry, SchemaCatalog};
pub use ddl::{column_type, create_table_statement, warehouse_type, PARTITION_COLUMN};
pub use types::{FieldType, SchemaField, StreamSchema, DATE_ONLY_LABEL};

#[cfg(test)]
mod tests;
