// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]

//! # Simpli.fi Tap
//!
//! Extracts advertising report data from the Simpli.fi platform and writes
//! it as schema-typed records, one JSON message per line.
//!
//! ## Features
//!
//! - **Report Snapshots**: Request, poll and stream-download delimited reports
//! - **Campaign Stats**: Read the stats endpoint at ad or campaign level
//! - **Schema Mapping**: Map report columns to typed attributes by label
//! - **Checkpoints**: A state message and state file entry per finished stream
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simplifi_tap::{SchemaCatalog, SingerWriter, StreamDispatcher, TapConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> simplifi_tap::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let schemas = SchemaCatalog::load_dir("schemas")?;
//!     let catalog = schemas.discover();
//!
//!     let dispatcher = StreamDispatcher::new(config, schemas)?;
//!     let mut writer = SingerWriter::stdout();
//!     dispatcher
//!         .sync_catalog(&catalog, None, &mut writer, &CancellationToken::new())
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        StreamDispatcher                          │
//! │   plan_streams(catalog) → [SyncPlan]    sync(plans) → SyncStats  │
//! └──────────────────────────────────────────────────────────────────┘
//!                                 │
//! ┌──────────┬────────────┬───────┴──────┬────────────┬──────────────┐
//! │ Registry │  Snapshot  │    Decode    │  Mapping   │    Output    │
//! ├──────────┼────────────┼──────────────┼────────────┼──────────────┤
//! │ Reports  │ Create     │ CSV reader   │ By label   │ SCHEMA       │
//! │ Stats    │ Poll       │ Column index │ Coercion   │ RECORD       │
//! │          │ Backoff    │ Row stream   │ Failures   │ STATE        │
//! └──────────┴────────────┴──────────────┴────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Tap configuration
pub mod config;

/// Platform auth headers
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Stream id to retrieval strategy registry
pub mod registry;

/// Stream schemas, catalog and DDL
pub mod schema;

/// Report snapshot request and polling
pub mod snapshot;

/// Streaming CSV decoding
pub mod decode;

/// Row to record mapping
pub mod mapping;

/// Campaign stats endpoint
pub mod stats;

/// Checkpoint state
pub mod state;

/// Output messages and sinks
pub mod output;

/// Sync execution engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::TapConfig;
pub use engine::{StreamDispatcher, SyncPlan, SyncStats};
pub use error::{Error, Result};
pub use output::{Message, MessageSink, SingerWriter};
pub use registry::{ReportRegistry, StreamKind};
pub use schema::{Catalog, SchemaCatalog};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
