//! Campaign stats retrieval
//!
//! The `ad_reports` and `campaign_reports` streams do not go through report
//! snapshots. They are read with a single request to the campaign stats
//! endpoint, and each returned row is emitted as-is apart from its
//! `resources` key.

use crate::error::{Error, Result};
use crate::http::{Endpoints, HttpClient, RequestConfig};
use crate::registry::StatsLevel;
use crate::types::{JsonObject, JsonValue};
use tracing::debug;

/// Key stripped from every stats row
pub const RESOURCES_KEY: &str = "resources";

/// Fetches rows from the campaign stats endpoint
pub struct StatsFetcher<'a> {
    client: &'a HttpClient,
    endpoints: &'a Endpoints,
}

impl<'a> StatsFetcher<'a> {
    /// Create a stats fetcher
    pub fn new(client: &'a HttpClient, endpoints: &'a Endpoints) -> Self {
        Self { client, endpoints }
    }

    /// Fetch stats rows for a date window. The request is not retried.
    pub async fn fetch_stats(
        &self,
        level: StatsLevel,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<JsonObject>> {
        let url = self.endpoints.campaign_stats();
        let request = RequestConfig::new()
            .query("by_campaign", "true")
            .query("by_ad", level.by_ad().to_string())
            .query("start_date", start_date)
            .query("end_date", end_date)
            .no_retry();

        let body: JsonValue = self
            .client
            .get_json_with_config(url.as_str(), request)
            .await?;
        let rows = stats_rows(body, url.as_str())?;

        debug!("Fetched {} campaign stats rows", rows.len());
        Ok(rows)
    }
}

/// Extract `campaign_stats` rows and strip `resources` from each
fn stats_rows(body: JsonValue, endpoint: &str) -> Result<Vec<JsonObject>> {
    let JsonValue::Object(mut body) = body else {
        return Err(Error::malformed(endpoint, "response is not a JSON object"));
    };

    let Some(JsonValue::Array(rows)) = body.remove("campaign_stats") else {
        return Err(Error::malformed(
            endpoint,
            "response has no 'campaign_stats' array",
        ));
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            JsonValue::Object(mut row) => {
                row.shift_remove(RESOURCES_KEY);
                Ok(row)
            }
            _ => Err(Error::malformed(
                endpoint,
                format!("campaign_stats[{index}] is not an object"),
            )),
        })
        .collect()
}
