//! Engine types
//!
//! Stream plans, lifecycle phases and sync statistics.

use crate::registry::StreamKind;
use crate::schema::SchemaField;
use crate::types::JsonValue;

/// Everything needed to sync one stream, resolved before any request
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    /// Stream id
    pub stream_id: String,
    /// Retrieval strategy
    pub kind: StreamKind,
    /// Schema announced to the sink
    pub schema: JsonValue,
    /// Primary key attributes from the catalog
    pub key_properties: Vec<String>,
    /// Declared fields used to map report rows; empty for stats streams
    pub fields: Vec<SchemaField>,
}

/// Where a stream is in its sync lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// Planned for this run
    Selected,
    /// Schema message written
    SchemaAnnounced,
    /// Reading the campaign stats endpoint
    StatsMode,
    /// Requesting, polling and downloading a report snapshot
    ReportMode,
    /// All records written
    RecordsEmitted,
    /// Checkpoint written
    Checkpointed,
}

impl std::fmt::Display for StreamPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StreamPhase::Selected => "selected",
            StreamPhase::SchemaAnnounced => "schema_announced",
            StreamPhase::StatsMode => "stats_mode",
            StreamPhase::ReportMode => "report_mode",
            StreamPhase::RecordsEmitted => "records_emitted",
            StreamPhase::Checkpointed => "checkpointed",
        };
        write!(f, "{name}")
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Streams that reached their checkpoint
    pub streams_synced: usize,
    /// Records written to the sink
    pub records_synced: usize,
    /// Fields left out of records
    pub field_failures: usize,
    /// Report streams skipped after a failed snapshot
    pub skipped_snapshots: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_synced += count;
    }

    /// Add field mapping failures
    pub fn add_field_failures(&mut self, count: usize) {
        self.field_failures += count;
    }

    /// Add a stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Add a skipped snapshot
    pub fn add_skipped_snapshot(&mut self) {
        self.skipped_snapshots += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
