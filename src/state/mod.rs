//! State management module
//!
//! Every synced stream ends with a checkpoint. Checkpoints are emitted as
//! STATE messages by the dispatcher and, when a state file is given, kept
//! on disk so earlier streams' checkpoints survive a later failure.

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{Checkpoint, State};
