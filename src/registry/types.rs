//! Registry types

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Date filter column used by the summary reports
const FACT_DELIVERY_DATE: &str = "fact_delivery.event_date";
/// Date filter column used by every other report
const SUMMARY_EVENTS_DATE: &str = "summary_delivery_events.event_date";

/// Reports served through scheduled snapshots: (stream id, report id, date filter)
const REPORTS: &[(&str, u64, &str)] = &[
    ("campaign_general_summary_reports", 728_559, FACT_DELIVERY_DATE),
    ("campaign_conversion_summary_reports", 728_557, SUMMARY_EVENTS_DATE),
    ("campaign_geofence_reports", 728_564, SUMMARY_EVENTS_DATE),
    ("campaign_device_reports", 728_558, SUMMARY_EVENTS_DATE),
    ("campaign_keyword_reports", 728_561, SUMMARY_EVENTS_DATE),
    ("campaign_network_publisher_reports", 728_556, SUMMARY_EVENTS_DATE),
    ("ad_summary_reports", 728_565, FACT_DELIVERY_DATE),
    ("ad_conversion_reports", 728_563, SUMMARY_EVENTS_DATE),
    ("ad_device_reports", 728_560, SUMMARY_EVENTS_DATE),
    ("ad_keyword_reports", 728_562, SUMMARY_EVENTS_DATE),
    ("ad_geofence_reports", 728_566, SUMMARY_EVENTS_DATE),
    ("ad_network_publisher_reports", 728_567, SUMMARY_EVENTS_DATE),
];

/// Static identification of the remote report behind a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDescriptor {
    /// Stream id
    pub stream_id: String,
    /// Report center report id
    pub report_id: u64,
    /// Filter key the date range is assigned to
    pub date_filter_param: String,
}

impl ReportDescriptor {
    /// Create a report descriptor
    pub fn new(
        stream_id: impl Into<String>,
        report_id: u64,
        date_filter_param: impl Into<String>,
    ) -> Self {
        Self {
            stream_id: stream_id.into(),
            report_id,
            date_filter_param: date_filter_param.into(),
        }
    }
}

/// Aggregation level of the campaign stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsLevel {
    /// One row per ad (`by_ad=true`)
    Ad,
    /// One row per campaign (`by_ad=false`)
    Campaign,
}

impl StatsLevel {
    /// Value of the `by_ad` query flag
    pub fn by_ad(self) -> bool {
        matches!(self, StatsLevel::Ad)
    }
}

/// Retrieval strategy for a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamKind {
    /// Direct request against the campaign stats endpoint
    Stats(StatsLevel),
    /// Scheduled report snapshot, polled then downloaded as CSV
    Report(ReportDescriptor),
}

impl StreamKind {
    /// Short name for logs
    pub fn mode(&self) -> &'static str {
        match self {
            StreamKind::Stats(_) => "stats",
            StreamKind::Report(_) => "report",
        }
    }
}

/// Read-only lookup from stream id to retrieval strategy
#[derive(Debug, Clone)]
pub struct ReportRegistry {
    kinds: HashMap<String, StreamKind>,
}

impl ReportRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Create the registry of every stream the platform supports
    pub fn builtin() -> Self {
        let mut registry = Self::empty()
            .with_stats("ad_reports", StatsLevel::Ad)
            .with_stats("campaign_reports", StatsLevel::Campaign);

        for (stream_id, report_id, date_param) in REPORTS {
            registry =
                registry.with_report(ReportDescriptor::new(*stream_id, *report_id, *date_param));
        }

        registry
    }

    /// Register a snapshot-backed stream
    #[must_use]
    pub fn with_report(mut self, descriptor: ReportDescriptor) -> Self {
        self.kinds.insert(
            descriptor.stream_id.clone(),
            StreamKind::Report(descriptor),
        );
        self
    }

    /// Register a stats-backed stream
    #[must_use]
    pub fn with_stats(mut self, stream_id: impl Into<String>, level: StatsLevel) -> Self {
        self.kinds.insert(stream_id.into(), StreamKind::Stats(level));
        self
    }

    /// Resolve the strategy for a stream; unknown ids are a catalog error
    pub fn resolve(&self, stream_id: &str) -> Result<StreamKind> {
        self.kinds
            .get(stream_id)
            .cloned()
            .ok_or_else(|| Error::schema_lookup(stream_id))
    }

    /// Whether the stream id is registered
    pub fn contains(&self, stream_id: &str) -> bool {
        self.kinds.contains_key(stream_id)
    }

    /// Registered stream ids, sorted
    pub fn stream_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered streams
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for ReportRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
