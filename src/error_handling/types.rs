//! Error type definitions.
//!
//! This module defines the error types and outcome categories used throughout
//! the worker.

use log::SetLoggerError;
use std::path::PathBuf;
use std::process::ExitStatus;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors from the GeoIP database engine.
///
/// All of these are transient: opens are retried and lookup failures only
/// affect the address being looked up.
#[derive(Error, Debug)]
pub enum GeoIpError {
    /// The database file could not be read.
    #[error("Failed to read GeoIP database from {path:?}: {source}")]
    Read {
        /// Database file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a usable database.
    #[error("Failed to parse GeoIP database from {path:?}: {message}")]
    Open {
        /// Database file
        path: PathBuf,
        /// Engine error message
        message: String,
    },

    /// A single lookup failed inside the engine.
    #[error("GeoIP lookup failed: {0}")]
    Lookup(String),
}

/// Errors from invoking the external refresh executable.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// The executable could not be started.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Executable name or path
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The executable ran and exited unsuccessfully.
    #[error("{program} exited with {status}")]
    Failed {
        /// Executable name or path
        program: String,
        /// Exit status
        status: ExitStatus,
        /// Combined stdout and stderr.
        output: String,
    },
}

impl RefreshError {
    /// Captured output of the failed invocation, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            RefreshError::Spawn { .. } => None,
            RefreshError::Failed { output, .. } => Some(output),
        }
    }
}

/// Errors converting an event between its wire form and `Event`.
#[derive(Error, Debug)]
pub enum EventError {
    /// The inbound message is not a valid event.
    #[error("Couldn't unmarshal json: {0}")]
    Decode(#[source] serde_json::Error),

    /// The enriched event could not be serialized.
    #[error("JSON marshal error: {0}")]
    Encode(#[source] serde_json::Error),
}

/// What happened to a single inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum EventOutcome {
    /// Forwarded with a location attached.
    Enriched,
    /// Forwarded without a new location.
    Unenriched,
    /// Dropped: the message did not decode.
    DecodeFailed,
    /// Dropped: the enriched event did not encode.
    EncodeFailed,
}

impl EventOutcome {
    /// Human-readable label used in statistics output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventOutcome::Enriched => "Enriched",
            EventOutcome::Unenriched => "No location",
            EventOutcome::DecodeFailed => "Decode failed",
            EventOutcome::EncodeFailed => "Encode failed",
        }
    }

    /// True when the event was dropped rather than forwarded.
    pub fn is_dropped(&self) -> bool {
        matches!(self, EventOutcome::DecodeFailed | EventOutcome::EncodeFailed)
    }
}
