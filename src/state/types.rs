//! State types
//!
//! A checkpoint marks a stream as fully synced at a point in time. The
//! persisted state keeps the latest checkpoint of every stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Watermark written after a stream finishes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// When the stream finished
    pub last_updated_at: DateTime<Utc>,
    /// Stream id
    pub stream: String,
}

impl Checkpoint {
    /// Create a checkpoint for a stream at the given time
    pub fn new(stream: impl Into<String>, last_updated_at: DateTime<Utc>) -> Self {
        Self {
            last_updated_at,
            stream: stream.into(),
        }
    }

    /// Create a checkpoint for a stream finishing now
    pub fn now(stream: impl Into<String>) -> Self {
        Self::new(stream, Utc::now())
    }
}

/// Latest checkpoint per stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Checkpoints keyed by stream id
    #[serde(default)]
    pub streams: BTreeMap<String, Checkpoint>,
}

impl State {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest checkpoint of a stream
    pub fn checkpoint(&self, stream: &str) -> Option<&Checkpoint> {
        self.streams.get(stream)
    }

    /// Record a checkpoint, replacing any earlier one for the same stream
    pub fn record(&mut self, checkpoint: Checkpoint) {
        self.streams.insert(checkpoint.stream.clone(), checkpoint);
    }
}
