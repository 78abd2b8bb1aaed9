//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for the database, refresh and event paths
//! - Event outcome categories
//! - Pipeline statistics tracking
//!
//! Nothing in here is fatal to the pipeline: database and refresh errors are
//! retried, event errors drop a single event.

mod stats;
mod types;

// Re-export public API
pub use stats::PipelineStats;
pub use types::{EventError, EventOutcome, GeoIpError, InitializationError, RefreshError};
