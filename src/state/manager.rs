//! State manager implementation
//!
//! Keeps checkpoints in memory and, when backed by a file, rewrites the file
//! atomically after every checkpoint.

use super::types::{Checkpoint, State};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// State manager for persisting and loading checkpoints
#[derive(Debug, Clone)]
pub struct StateManager {
    /// Path to the state file, if persisted
    path: Option<PathBuf>,
    /// Current state
    state: Arc<RwLock<State>>,
}

impl StateManager {
    /// Create an in-memory state manager (no file persistence)
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: Arc::new(RwLock::new(State::new())),
        }
    }

    /// Create a state manager backed by a file, loading it if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::state(format!("Failed to read state file: {e}")))?;
            if contents.trim().is_empty() {
                State::new()
            } else {
                serde_json::from_str(&contents)
                    .map_err(|e| Error::state(format!("Failed to parse state file: {e}")))?
            }
        } else {
            State::new()
        };

        Ok(Self {
            path: Some(path),
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Record a checkpoint and persist it
    pub async fn checkpoint(&self, checkpoint: Checkpoint) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.record(checkpoint);
        }
        self.save().await
    }

    /// Latest checkpoint of a stream
    pub async fn get_checkpoint(&self, stream: &str) -> Option<Checkpoint> {
        let state = self.state.read().await;
        state.checkpoint(stream).cloned()
    }

    /// Write the current state to the backing file
    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let contents = self.to_json_pretty().await?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::state(format!("Failed to write state file: {e}")))?;
        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|e| Error::state(format!("Failed to rename state file: {e}")))?;

        debug!("Saved state to {}", path.display());
        Ok(())
    }

    /// Get a read lock on the current state
    pub async fn state(&self) -> tokio::sync::RwLockReadGuard<'_, State> {
        self.state.read().await
    }

    /// Export state as pretty-printed JSON
    pub async fn to_json_pretty(&self) -> Result<String> {
        let state = self.state.read().await;
        serde_json::to_string_pretty(&*state)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))
    }

    /// Path of the backing file
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
