//! Event enrichment pipeline.
//!
//! This module provides:
//! - Address extraction from tagged address lists
//! - The per-event enrichment handler
//! - The output sink abstraction

mod extract;
mod handler;
mod sink;

// Re-export public API
pub use extract::first_ip_address;
pub use handler::EnrichmentPipeline;
pub use sink::{LineSink, OutputSink};
