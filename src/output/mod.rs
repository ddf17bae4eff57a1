//! Output module
//!
//! Sync output is a sequence of SCHEMA, RECORD and STATE messages written
//! as JSON lines. Standard output is reserved for these messages; logs go
//! to standard error.

mod messages;
mod sink;

pub use messages::Message;
pub use sink::{MemorySink, MessageSink, SingerWriter};
