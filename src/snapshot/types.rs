//! Snapshot job types

use crate::error::{Error, Result};
use crate::types::{BackoffType, JsonValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

// ============================================================================
// Poll Policy
// ============================================================================

/// What to do when the platform reports a snapshot as failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStatusPolicy {
    /// Treat "failure" like any other unfinished status
    #[default]
    KeepPolling,
    /// Stop polling and sync the stream without records
    SkipStream,
}

/// Bounded polling policy for snapshot completion
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Delay after the first poll
    pub initial_interval: Duration,
    /// Cap on the delay between polls
    pub max_interval: Duration,
    /// Give up once this much time has passed since the first poll
    pub max_wait: Duration,
    /// Give up after this many polls
    pub max_attempts: Option<u32>,
    /// How the delay grows between polls
    pub backoff: BackoffType,
    /// Handling of an explicit "failure" status
    pub on_failure_status: FailureStatusPolicy,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(2),
            max_interval: Duration::from_secs(30),
            max_wait: Duration::from_secs(30 * 60),
            max_attempts: None,
            backoff: BackoffType::Exponential,
            on_failure_status: FailureStatusPolicy::KeepPolling,
        }
    }
}

impl PollConfig {
    /// Delay after the given (one-based) poll
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.delay(
            attempt.saturating_sub(1),
            self.initial_interval,
            self.max_interval,
        )
    }
}

// ============================================================================
// Snapshot Handle
// ============================================================================

/// A created snapshot job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHandle {
    /// Snapshot id as returned by the platform
    pub id: String,
    /// Status endpoint of the snapshot
    pub status_url: Url,
}

impl SnapshotHandle {
    /// Create a snapshot handle
    pub fn new(id: impl Into<String>, status_url: Url) -> Self {
        Self {
            id: id.into(),
            status_url,
        }
    }
}

/// Status of a snapshot job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// Queued or running
    Pending,
    /// Ready for download
    Success,
    /// Reported as failed by the platform
    Failure,
    /// Any status the platform sends that is not listed above
    Other(String),
}

impl SnapshotStatus {
    /// Parse a raw status value
    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => Self::Pending,
            "success" => Self::Success,
            "failure" => Self::Failure,
            other => Self::Other(other.to_string()),
        }
    }

    /// Check if the snapshot is ready for download
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for SnapshotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// How polling ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The snapshot is ready at this download location
    Ready(String),
    /// The platform reported a failure and the stream is skipped
    Failed(SnapshotStatus),
}

/// First entry of the `snapshots` array of a response body
pub(crate) fn first_snapshot<'a>(body: &'a JsonValue, endpoint: &str) -> Result<&'a JsonValue> {
    body.get("snapshots")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::malformed(endpoint, "response has no 'snapshots' array"))?
        .first()
        .ok_or_else(|| Error::malformed(endpoint, "'snapshots' array is empty"))
}
