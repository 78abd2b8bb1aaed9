//! Application initialization.
//!
//! This module provides functions to set up process-wide resources before the
//! worker starts.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
