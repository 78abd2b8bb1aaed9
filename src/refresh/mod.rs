//! Reference-data refresh.
//!
//! The updater runs the external refresh command on a timer and posts a
//! reload notification on success. The pipeline picks the notification up
//! between events and reopens the databases itself.

mod command;
mod signal;
mod updater;

// Re-export public API
pub use command::{GeoIpUpdateCommand, RefreshCommand};
pub use signal::{refresh_signal, RefreshListener, RefreshNotifier};
pub use updater::{ReferenceDataUpdater, RefreshSchedule};
