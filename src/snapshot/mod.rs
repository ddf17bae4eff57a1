//! Snapshot module
//!
//! Reports are not served directly: a snapshot job is created for a report
//! and date filter, polled until the platform marks it successful, and then
//! downloaded from the returned link.
//!
//! # Flow
//!
//! ```text
//! SnapshotRequester::create_snapshot ──► SnapshotHandle
//!                                           │
//! SnapshotPoller::await_completion ◄────────┘
//!          │
//!          ├── Ready(download_link)
//!          └── Failed(status)        (only with FailureStatusPolicy::SkipStream)
//! ```

mod poller;
mod requester;
mod types;

pub use poller::SnapshotPoller;
pub use requester::{SnapshotRequester, CLIENT_ID_FILTER, DESTINATION_FORMAT};
pub use types::{FailureStatusPolicy, PollConfig, PollOutcome, SnapshotHandle, SnapshotStatus};
