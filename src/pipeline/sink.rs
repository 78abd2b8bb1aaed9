//! Output side of the pipeline.

use anyhow::{Context, Result};
use std::io::Write;

/// Receives encoded events, tagged with the destination they are meant for.
pub trait OutputSink {
    /// Hands one encoded event to `destination`.
    fn send(&mut self, destination: &str, payload: Vec<u8>) -> Result<()>;
}

/// Writes each payload as one line (NDJSON).
///
/// The destination tag is not written: there is a single output stream.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush output")
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for LineSink<W> {
    fn send(&mut self, destination: &str, payload: Vec<u8>) -> Result<()> {
        self.writer
            .write_all(&payload)
            .and_then(|_| self.writer.write_all(b"\n"))
            .with_context(|| format!("Failed to write event to {}", destination))
    }
}
