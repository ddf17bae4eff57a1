//! Schema tests

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn campaign_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "campaign_id": {"type": ["null", "integer"], "label": "Campaign ID"},
            "campaign_name": {"type": "string", "label": "Campaign Name"},
            "event_date": {"type": "string", "label": "Time Event Date"},
            "ctr": {"type": ["null", "number"], "label": "CTR"},
            "active": {"type": "boolean", "label": "Active"}
        }
    })
}

// ============================================================================
// Field declarations
// ============================================================================

#[test]
fn test_fields_in_schema_order() {
    let schema = StreamSchema::new("campaign", campaign_schema());
    let fields = schema.fields().unwrap();

    let names: Vec<&str> = fields.iter().map(|f| f.attribute_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["campaign_id", "campaign_name", "event_date", "ctr", "active"]
    );
}

#[test]
fn test_field_types_resolved() {
    let schema = StreamSchema::new("campaign", campaign_schema());
    let fields = schema.fields().unwrap();

    assert_eq!(fields[0].declared_type, FieldType::Integer);
    assert_eq!(fields[1].declared_type, FieldType::String);
    assert_eq!(fields[2].declared_type, FieldType::String);
    assert_eq!(fields[3].declared_type, FieldType::Number);
    assert_eq!(fields[4].declared_type, FieldType::Boolean);
    assert_eq!(fields[0].label, "Campaign ID");
}

#[test]
fn test_numeric_types() {
    assert!(FieldType::Integer.is_numeric());
    assert!(FieldType::Number.is_numeric());
    assert!(!FieldType::String.is_numeric());
    assert!(!FieldType::Boolean.is_numeric());
}

#[test]
fn test_missing_label_is_error() {
    let schema = StreamSchema::new(
        "broken",
        json!({"properties": {"id": {"type": "integer"}}}),
    );
    let err = schema.fields().unwrap_err();
    assert!(err.to_string().contains("no label"));
}

#[test]
fn test_unsupported_type_is_error() {
    let schema = StreamSchema::new(
        "broken",
        json!({"properties": {"tags": {"type": "array", "label": "Tags"}}}),
    );
    let err = schema.fields().unwrap_err();
    assert!(err.to_string().contains("unsupported type 'array'"));
}

#[test]
fn test_missing_properties_is_error() {
    let schema = StreamSchema::new("broken", json!({"type": "object"}));
    assert!(schema.fields().is_err());
}

// ============================================================================
// Schema catalog
// ============================================================================

#[test]
fn test_load_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("campaign.json"),
        campaign_schema().to_string(),
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let catalog = SchemaCatalog::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("campaign").unwrap().stream_id, "campaign");
}

#[test]
fn test_load_dir_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("campaign.json"), "{not json").unwrap();

    let err = SchemaCatalog::load_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("campaign"));
}

#[test]
fn test_load_dir_missing() {
    let result = SchemaCatalog::load_dir("/nonexistent/schemas");
    assert!(result.is_err());
}

#[test]
fn test_get_falls_back_to_lowercase() {
    let catalog = SchemaCatalog::new().with_schema("campaign", campaign_schema());
    assert!(catalog.get("Campaign").is_ok());
    assert!(catalog.get("unknown").is_err());
}

#[test]
fn test_discover_marks_streams_selected() {
    let catalog = SchemaCatalog::new()
        .with_schema("geo_fence", campaign_schema())
        .with_schema("campaign", campaign_schema());

    let discovered = catalog.discover();
    let ids: Vec<&str> = discovered
        .streams
        .iter()
        .map(|e| e.tap_stream_id.as_str())
        .collect();
    assert_eq!(ids, vec!["campaign", "geo_fence"]);
    assert_eq!(discovered.selected_streams().count(), 2);
}

// ============================================================================
// Catalog selection
// ============================================================================

#[test]
fn test_catalog_selection_from_metadata() {
    let catalog = Catalog::from_json(
        r#"{
            "streams": [
                {
                    "tap_stream_id": "campaign",
                    "stream": "campaign",
                    "schema": {"properties": {}},
                    "metadata": [{"breadcrumb": [], "metadata": {"selected": true}}]
                },
                {
                    "tap_stream_id": "ad",
                    "stream": "ad",
                    "schema": {"properties": {}},
                    "metadata": [{"breadcrumb": [], "metadata": {"selected": false}}]
                },
                {
                    "tap_stream_id": "legacy",
                    "stream": "legacy",
                    "schema": {"selected": true, "properties": {}}
                }
            ]
        }"#,
    )
    .unwrap();

    let selected: Vec<&str> = catalog
        .selected_streams()
        .map(|e| e.tap_stream_id.as_str())
        .collect();
    assert_eq!(selected, vec!["campaign", "legacy"]);
    assert!(catalog.get("ad").is_some());
    assert!(catalog.get("missing").is_none());
}

#[test]
fn test_catalog_invalid_json() {
    let err = Catalog::from_json("[]").unwrap_err();
    assert!(err.to_string().contains("Invalid catalog JSON"));
}

#[test]
fn test_catalog_roundtrip_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let catalog = SchemaCatalog::new()
        .with_schema("campaign", campaign_schema())
        .discover();
    std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

    let loaded = Catalog::from_file(&path).unwrap();
    assert_eq!(loaded, catalog);
}

// ============================================================================
// DDL
// ============================================================================

#[test]
fn test_create_table_statement() {
    let schema = StreamSchema::new("campaign", campaign_schema());
    let fields = schema.fields().unwrap();

    let ddl = create_table_statement("simplifi", "campaign", &fields);
    assert_eq!(
        ddl,
        "CREATE TABLE simplifi.campaign (campaign_id INT64,campaign_name STRING,\
         event_date DATE,ctr FLOAT64,active BOOL) PARTITION BY event_date;"
    );
}

#[test]
fn test_warehouse_types() {
    assert_eq!(warehouse_type(FieldType::Integer), "INT64");
    assert_eq!(warehouse_type(FieldType::String), "STRING");
    assert_eq!(warehouse_type(FieldType::Boolean), "BOOL");
}

#[test]
fn test_event_date_label_keeps_declared_type() {
    let schema = StreamSchema::new(
        "campaign",
        json!({"properties": {
            "event_day": {"type": "integer", "label": "Time Event Date"}
        }}),
    );
    let fields = schema.fields().unwrap();

    assert_eq!(fields[0].declared_type, FieldType::Integer);
    assert_eq!(column_type(&fields[0]), "DATE");
    assert_eq!(
        column_type(&SchemaField::new("day", "Event Date", FieldType::String)),
        "STRING"
    );
}
