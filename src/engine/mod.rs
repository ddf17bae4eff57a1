//! Execution engine module
//!
//! Plans and runs a sync over the selected catalog streams.
//!
//! # Overview
//!
//! Every stream moves through the same phases:
//!
//! ```text
//! SELECTED → SCHEMA_ANNOUNCED → STATS_MODE  ─┐
//!                             → REPORT_MODE ─┴→ RECORDS_EMITTED → CHECKPOINTED
//! ```
//!
//! Plans for all streams are resolved before the first request, so a catalog
//! naming an unknown stream fails without touching the network. A fatal
//! error stops the sync; streams checkpointed before it keep their
//! checkpoints.

mod types;

pub use types::{StreamPhase, SyncPlan, SyncStats};

use crate::auth::AuthHeaders;
use crate::config::TapConfig;
use crate::decode::ReportStreamDecoder;
use crate::error::{Error, Result};
use crate::http::{Endpoints, HttpClient, HttpClientConfig, RequestConfig};
use crate::mapping::RecordMapper;
use crate::output::{Message, MessageSink};
use crate::registry::{ReportDescriptor, ReportRegistry, StatsLevel, StreamKind};
use crate::schema::{Catalog, SchemaCatalog};
use crate::snapshot::{PollConfig, PollOutcome, SnapshotPoller, SnapshotRequester};
use crate::state::{Checkpoint, StateManager};
use crate::stats::StatsFetcher;
use futures::TryStreamExt;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Timeout for the report download, which streams the whole file
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Runs selected streams against the platform
pub struct StreamDispatcher {
    config: TapConfig,
    client: HttpClient,
    endpoints: Endpoints,
    registry: ReportRegistry,
    schemas: SchemaCatalog,
    poll: PollConfig,
    state: StateManager,
}

impl StreamDispatcher {
    /// Build a dispatcher from validated configuration
    pub fn new(config: TapConfig, schemas: SchemaCatalog) -> Result<Self> {
        config.validate()?;

        let auth = AuthHeaders::from_config(&config)?;
        let mut http = HttpClientConfig::from_settings(&config.http);
        http.default_headers = auth.to_header_map();
        let client = HttpClient::with_config(http)?;

        let endpoints = Endpoints::new(config.base_url()?, config.organization_id()?)?;
        let poll = config.poll.to_poll_config();

        Ok(Self {
            config,
            client,
            endpoints,
            registry: ReportRegistry::builtin(),
            schemas,
            poll,
            state: StateManager::in_memory(),
        })
    }

    /// Replace the stream registry
    #[must_use]
    pub fn with_registry(mut self, registry: ReportRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the snapshot poll policy
    #[must_use]
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Persist checkpoints through the given state manager
    #[must_use]
    pub fn with_state(mut self, state: StateManager) -> Self {
        self.state = state;
        self
    }

    /// The state manager receiving checkpoints
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Resolve a plan for every selected stream, in catalog order.
    ///
    /// `only` narrows the selection to the named streams.
    pub fn plan_streams(&self, catalog: &Catalog, only: Option<&[String]>) -> Result<Vec<SyncPlan>> {
        if let Some(names) = only {
            for name in names {
                if !catalog
                    .selected_streams()
                    .any(|entry| &entry.tap_stream_id == name)
                {
                    return Err(Error::config(format!(
                        "Stream '{name}' is not selected in the catalog"
                    )));
                }
            }
        }

        let mut plans = Vec::new();
        for entry in catalog.selected_streams() {
            if only.is_some_and(|names| !names.contains(&entry.tap_stream_id)) {
                continue;
            }

            let stream_id = entry.tap_stream_id.clone();
            let kind = self.registry.resolve(&stream_id)?;
            let schema = self.schemas.get(&stream_id)?;

            let fields = match &kind {
                StreamKind::Report(_) => {
                    self.config.require_date_range()?;
                    schema.fields()?
                }
                StreamKind::Stats(_) => {
                    self.config.require_stats_window()?;
                    Vec::new()
                }
            };

            debug!("Stream {stream_id}: {}", StreamPhase::Selected);
            plans.push(SyncPlan {
                stream_id,
                kind,
                schema: schema.schema.clone(),
                key_properties: entry.key_properties.clone(),
                fields,
            });
        }

        info!("Planned {} streams", plans.len());
        Ok(plans)
    }

    /// Plan and sync the selected catalog streams
    pub async fn sync_catalog(
        &self,
        catalog: &Catalog,
        only: Option<&[String]>,
        sink: &mut dyn MessageSink,
        cancel: &CancellationToken,
    ) -> Result<SyncStats> {
        let plans = self.plan_streams(catalog, only)?;
        self.sync(&plans, sink, cancel).await
    }

    /// Sync planned streams one after another
    pub async fn sync(
        &self,
        plans: &[SyncPlan],
        sink: &mut dyn MessageSink,
        cancel: &CancellationToken,
    ) -> Result<SyncStats> {
        let start = Instant::now();
        let mut stats = SyncStats::new();

        for plan in plans {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            self.sync_stream(plan, sink, cancel, &mut stats).await?;
        }

        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Sync complete: {} streams, {} records, {} field failures in {}ms",
            stats.streams_synced, stats.records_synced, stats.field_failures, stats.duration_ms
        );
        Ok(stats)
    }

    async fn sync_stream(
        &self,
        plan: &SyncPlan,
        sink: &mut dyn MessageSink,
        cancel: &CancellationToken,
        stats: &mut SyncStats,
    ) -> Result<()> {
        let stream = plan.stream_id.as_str();
        info!("Syncing stream: {stream} ({} mode)", plan.kind.mode());

        sink.write_message(&Message::schema(
            stream,
            plan.schema.clone(),
            plan.key_properties.clone(),
        ))?;
        debug!("Stream {stream}: {}", StreamPhase::SchemaAnnounced);

        let records = match &plan.kind {
            StreamKind::Stats(level) => {
                debug!("Stream {stream}: {}", StreamPhase::StatsMode);
                self.sync_stats(stream, *level, sink).await?
            }
            StreamKind::Report(report) => {
                debug!("Stream {stream}: {}", StreamPhase::ReportMode);
                self.sync_report(plan, report, sink, cancel, stats).await?
            }
        };
        stats.add_records(records);
        debug!("Stream {stream}: {} ({records})", StreamPhase::RecordsEmitted);

        let checkpoint = Checkpoint::now(stream);
        self.state.checkpoint(checkpoint.clone()).await?;
        sink.write_message(&Message::state(checkpoint))?;
        stats.add_stream();
        debug!("Stream {stream}: {}", StreamPhase::Checkpointed);

        info!("Finished stream: {stream}, {records} records");
        Ok(())
    }

    async fn sync_stats(
        &self,
        stream: &str,
        level: StatsLevel,
        sink: &mut dyn MessageSink,
    ) -> Result<usize> {
        let (start_date, end_date) = self.config.require_stats_window()?;
        let rows = StatsFetcher::new(&self.client, &self.endpoints)
            .fetch_stats(level, start_date, end_date)
            .await?;

        let count = rows.len();
        for row in rows {
            sink.write_message(&Message::record(stream, row))?;
        }
        Ok(count)
    }

    async fn sync_report(
        &self,
        plan: &SyncPlan,
        report: &ReportDescriptor,
        sink: &mut dyn MessageSink,
        cancel: &CancellationToken,
        stats: &mut SyncStats,
    ) -> Result<usize> {
        let date_range = self.config.require_date_range()?;
        let handle = SnapshotRequester::new(&self.client, &self.endpoints)
            .create_snapshot(report, date_range)
            .await?;

        let download_link = match SnapshotPoller::new(&self.client, self.poll.clone())
            .await_completion(&handle, cancel)
            .await?
        {
            PollOutcome::Ready(link) => link,
            PollOutcome::Failed(status) => {
                info!(
                    "Skipping stream {} after snapshot {} ended with status {status}",
                    plan.stream_id, handle.id
                );
                stats.add_skipped_snapshot();
                return Ok(0);
            }
        };

        info!("Downloading report: {download_link}");
        let response = self
            .client
            .get_with_config(
                &download_link,
                RequestConfig::new()
                    .without_default_headers()
                    .timeout(DOWNLOAD_TIMEOUT),
            )
            .await?;

        let mut decoded = ReportStreamDecoder::open_response(response).await?;
        let mut count = 0;
        while let Some(row) = decoded.rows.try_next().await? {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let mapped = RecordMapper::map_row(&row.cells, row.number, &decoded.columns, &plan.fields);
            stats.add_field_failures(mapped.failures.len());
            sink.write_message(&Message::record(&plan.stream_id, mapped.record))?;
            count += 1;
        }

        Ok(count)
    }
}

impl std::fmt::Debug for StreamDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamDispatcher")
            .field("client", &self.client)
            .field("endpoints", &self.endpoints)
            .field("streams", &self.registry.len())
            .field("schemas", &self.schemas.len())
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}
