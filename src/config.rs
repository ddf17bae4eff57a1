//! Tap configuration
//!
//! The configuration file is a flat JSON object using the platform's
//! camelCase key names (`appKey`, `userKey`, `username`, `organizationId`,
//! `startDate`, `endDate`, `dateRange`). Optional `poll` and `http` sections
//! tune snapshot polling and the HTTP client.

use crate::error::{Error, Result};
use crate::snapshot::{FailureStatusPolicy, PollConfig};
use crate::types::{BackoffType, JsonValue, OptionStringExt};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://app.simpli.fi/api";

/// Date format accepted for `startDate` / `endDate`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete tap configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapConfig {
    /// Application key (`X-App-Key`)
    #[serde(default)]
    pub app_key: String,

    /// User key (`X-User-Key`)
    #[serde(default)]
    pub user_key: String,

    /// Account username (`MccUsername`)
    #[serde(default)]
    pub username: String,

    /// Organization whose reports are extracted. Accepts a number or a
    /// numeric string.
    #[serde(default, deserialize_with = "deserialize_organization_id")]
    pub organization_id: Option<u64>,

    /// First day of the stats window (`YYYY-MM-DD`)
    #[serde(default)]
    pub start_date: Option<String>,

    /// Last day of the stats window (`YYYY-MM-DD`)
    #[serde(default)]
    pub end_date: Option<String>,

    /// Report date filter, passed through to the snapshot request verbatim
    #[serde(default)]
    pub date_range: Option<JsonValue>,

    /// Override for the API root
    #[serde(default)]
    pub base_url: Option<String>,

    /// Snapshot polling settings
    #[serde(default)]
    pub poll: PollSettings,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

impl TapConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid config JSON: {e}")))
    }

    /// Check the fields every run needs
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("appKey", &self.app_key),
            ("userKey", &self.user_key),
            ("username", &self.username),
        ] {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }

        self.organization_id()?;
        self.base_url()?;
        self.poll.validate()?;
        Ok(())
    }

    /// The configured organization id
    pub fn organization_id(&self) -> Result<u64> {
        self.organization_id
            .ok_or_else(|| Error::missing_field("organizationId"))
    }

    /// The parsed API root
    pub fn base_url(&self) -> Result<Url> {
        let raw = self
            .base_url
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&raw).map_err(|e| Error::invalid_value("baseUrl", e.to_string()))
    }

    /// The date filter for report snapshots
    pub fn require_date_range(&self) -> Result<&JsonValue> {
        match &self.date_range {
            Some(JsonValue::Null) | None => Err(Error::missing_field("dateRange")),
            Some(value) => Ok(value),
        }
    }

    /// The `(startDate, endDate)` window for the stats endpoint, validated
    pub fn require_stats_window(&self) -> Result<(&str, &str)> {
        let start = self
            .start_date
            .as_deref()
            .ok_or_else(|| Error::missing_field("startDate"))?;
        let end = self
            .end_date
            .as_deref()
            .ok_or_else(|| Error::missing_field("endDate"))?;

        let start_day = parse_date("startDate", start)?;
        let end_day = parse_date("endDate", end)?;
        if end_day < start_day {
            return Err(Error::invalid_value(
                "endDate",
                format!("{end} is before startDate {start}"),
            ));
        }

        Ok((start, end))
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| Error::invalid_value(field, format!("'{value}' is not a YYYY-MM-DD date: {e}")))
}

fn deserialize_organization_id<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("organizationId '{text}' is not numeric"))),
    }
}

// ============================================================================
// Poll Settings
// ============================================================================

/// Snapshot polling settings as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PollSettings {
    /// Delay before the second poll
    pub interval_secs: u64,
    /// Cap on the delay between polls
    pub max_interval_secs: u64,
    /// Give up once this much time has passed since the first poll
    pub max_wait_secs: u64,
    /// Optional cap on the number of polls
    pub max_attempts: Option<u32>,
    /// How the delay grows between polls
    pub backoff: BackoffType,
    /// What to do when the platform reports a failed snapshot
    pub on_failure_status: FailureStatusPolicy,
}

impl Default for PollSettings {
    fn default() -> Self {
        let defaults = PollConfig::default();
        Self {
            interval_secs: defaults.initial_interval.as_secs(),
            max_interval_secs: defaults.max_interval.as_secs(),
            max_wait_secs: defaults.max_wait.as_secs(),
            max_attempts: defaults.max_attempts,
            backoff: defaults.backoff,
            on_failure_status: defaults.on_failure_status,
        }
    }
}

impl PollSettings {
    fn validate(&self) -> Result<()> {
        if self.max_wait_secs == 0 {
            return Err(Error::invalid_value(
                "poll.maxWaitSecs",
                "must be greater than zero",
            ));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::invalid_value(
                "poll.maxAttempts",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Convert to the runtime poll policy
    pub fn to_poll_config(&self) -> PollConfig {
        PollConfig {
            initial_interval: Duration::from_secs(self.interval_secs),
            max_interval: Duration::from_secs(self.max_interval_secs.max(self.interval_secs)),
            max_wait: Duration::from_secs(self.max_wait_secs),
            max_attempts: self.max_attempts,
            backoff: self.backoff,
            on_failure_status: self.on_failure_status,
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpSettings {
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Retries for 5xx, 429 and connection errors
    pub max_retries: u32,
    /// Client-side request throttle
    pub requests_per_second: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            max_retries: 3,
            requests_per_second: 5,
        }
    }
}
