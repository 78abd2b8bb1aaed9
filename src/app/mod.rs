//! Main application modules.
//!
//! This module provides the event input loop, shutdown handling, and
//! statistics printing used by the worker.

pub mod input;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use input::process_lines;
pub use shutdown::{cancel_on_interrupt, shutdown_gracefully};
pub use statistics::print_pipeline_statistics;
