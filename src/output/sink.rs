//! Message sinks

use super::messages::Message;
use crate::error::Result;
use crate::types::JsonObject;
use std::io::Write;

/// Destination for sync messages
pub trait MessageSink {
    /// Write one message; it must be visible to the consumer on return
    fn write_message(&mut self, message: &Message) -> Result<()>;
}

/// Writes messages as JSON lines
#[derive(Debug)]
pub struct SingerWriter<W: Write> {
    writer: W,
    written: usize,
}

impl SingerWriter<std::io::Stdout> {
    /// A writer on standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> SingerWriter<W> {
    /// Wrap any writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of messages written
    pub fn written(&self) -> usize {
        self.written
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for SingerWriter<W> {
    fn write_message(&mut self, message: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Keeps messages in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Messages in write order
    pub messages: Vec<Message>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records written for a stream, in order
    pub fn records(&self, stream: &str) -> Vec<&JsonObject> {
        self.messages
            .iter()
            .filter_map(|message| match message {
                Message::Record {
                    stream: name,
                    record,
                    ..
                } if name == stream => Some(record),
                _ => None,
            })
            .collect()
    }
}

impl MessageSink for MemorySink {
    fn write_message(&mut self, message: &Message) -> Result<()> {
        self.messages.push(message.clone());
        Ok(())
    }
}
