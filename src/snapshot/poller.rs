//! Snapshot completion polling

use super::types::{
    first_snapshot, FailureStatusPolicy, PollConfig, PollOutcome, SnapshotHandle, SnapshotStatus,
};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::types::JsonValue;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Polls a snapshot until it is ready
pub struct SnapshotPoller<'a> {
    client: &'a HttpClient,
    config: PollConfig,
}

impl<'a> SnapshotPoller<'a> {
    /// Create a poller with the given policy
    pub fn new(client: &'a HttpClient, config: PollConfig) -> Self {
        Self { client, config }
    }

    /// The active poll policy
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll until the snapshot succeeds.
    ///
    /// The first poll is issued immediately. Between polls the delay grows
    /// per the configured backoff. Polling stops with
    /// [`Error::SnapshotTimeout`] once `max_wait` has elapsed or
    /// `max_attempts` polls were made, and with [`Error::Cancelled`] when
    /// the token fires.
    pub async fn await_completion(
        &self,
        handle: &SnapshotHandle,
        cancel: &CancellationToken,
    ) -> Result<PollOutcome> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            attempts += 1;
            let status = self.poll_once(handle).await?;
            debug!(
                "Snapshot {} poll {}: {}",
                handle.id, attempts, status.status
            );

            match status.status {
                SnapshotStatus::Success => {
                    let link = status.download_link.ok_or_else(|| {
                        Error::malformed(
                            handle.status_url.as_str(),
                            "successful snapshot has no download_link",
                        )
                    })?;
                    return Ok(PollOutcome::Ready(link));
                }
                SnapshotStatus::Failure
                    if self.config.on_failure_status == FailureStatusPolicy::SkipStream =>
                {
                    error!("Snapshot {} failed", handle.id);
                    return Ok(PollOutcome::Failed(SnapshotStatus::Failure));
                }
                _ => {}
            }

            let waited = started.elapsed();
            let attempts_exhausted = self
                .config
                .max_attempts
                .is_some_and(|max| attempts >= max);
            if attempts_exhausted || waited >= self.config.max_wait {
                return Err(Error::SnapshotTimeout {
                    snapshot_id: handle.id.clone(),
                    attempts,
                    waited_ms: waited.as_millis() as u64,
                });
            }

            let delay = self
                .config
                .delay_after(attempts)
                .min(self.config.max_wait.saturating_sub(waited));

            tokio::select! {
                () = cancel.cancelled() => return Err(Error::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    async fn poll_once(&self, handle: &SnapshotHandle) -> Result<StatusReport> {
        let endpoint = handle.status_url.as_str();
        let body: JsonValue = self.client.get_json(endpoint).await?;
        let snapshot = first_snapshot(&body, endpoint)?;

        let status = snapshot
            .get("status")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::malformed(endpoint, "snapshot has no status"))?;

        Ok(StatusReport {
            status: SnapshotStatus::parse(status),
            download_link: snapshot
                .get("download_link")
                .and_then(JsonValue::as_str)
                .filter(|link| !link.is_empty())
                .map(String::from),
        })
    }
}

struct StatusReport {
    status: SnapshotStatus,
    download_link: Option<String>,
}
