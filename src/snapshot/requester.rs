//! Snapshot creation

use super::types::{first_snapshot, SnapshotHandle};
use crate::error::{Error, Result};
use crate::http::{Endpoints, HttpClient, RequestConfig};
use crate::registry::ReportDescriptor;
use crate::types::{JsonObject, JsonValue};
use tracing::info;

/// Export format requested for every snapshot
pub const DESTINATION_FORMAT: &str = "csv";

/// Filter key carrying the organization id
pub const CLIENT_ID_FILTER: &str = "dim_client.client_id";

/// Requests report snapshots
pub struct SnapshotRequester<'a> {
    client: &'a HttpClient,
    endpoints: &'a Endpoints,
}

impl<'a> SnapshotRequester<'a> {
    /// Create a requester
    pub fn new(client: &'a HttpClient, endpoints: &'a Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Request a CSV snapshot of a report for the given date filter.
    ///
    /// The POST is sent once. A failed attempt may still have started a
    /// job on the platform, so it is never re-sent.
    pub async fn create_snapshot(
        &self,
        report: &ReportDescriptor,
        date_range: &JsonValue,
    ) -> Result<SnapshotHandle> {
        let url = self.endpoints.create_snapshot(report.report_id);
        let body = self.request_body(report, date_range);

        let response: JsonValue = self
            .client
            .post_json_with_config(url.as_str(), RequestConfig::new().json(body).no_retry())
            .await?;
        let snapshot_id = snapshot_id(&response, url.as_str())?;

        let handle = SnapshotHandle::new(
            snapshot_id.clone(),
            self.endpoints.snapshot(report.report_id, &snapshot_id),
        );
        info!("Snapshot created: {}", handle.status_url);
        Ok(handle)
    }

    /// `{"destination_format": "csv", "filters": {...}}`
    pub fn request_body(&self, report: &ReportDescriptor, date_range: &JsonValue) -> JsonValue {
        let mut filters = JsonObject::new();
        filters.insert(report.date_filter_param.clone(), date_range.clone());
        filters.insert(
            CLIENT_ID_FILTER.to_string(),
            JsonValue::from(self.endpoints.organization_id()),
        );

        let mut body = JsonObject::new();
        body.insert(
            "destination_format".to_string(),
            JsonValue::from(DESTINATION_FORMAT),
        );
        body.insert("filters".to_string(), JsonValue::Object(filters));
        JsonValue::Object(body)
    }
}

/// `snapshots[0].id`, which the platform sends as a number or a string
fn snapshot_id(response: &JsonValue, endpoint: &str) -> Result<String> {
    match first_snapshot(response, endpoint)?.get("id") {
        Some(JsonValue::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(JsonValue::Number(id)) => Ok(id.to_string()),
        _ => Err(Error::malformed(endpoint, "snapshot has no id")),
    }
}
