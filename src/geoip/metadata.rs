//! Metadata about opened GeoIP databases.

use chrono::{DateTime, Utc};
use maxminddb::Reader;
use std::path::Path;

/// Metadata about a GeoIP database, logged every time it is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseMetadata {
    /// Source path
    pub source: String,
    /// Database edition, e.g. `GeoLite2-City`
    pub database_type: String,
    /// Build time as seconds since the Unix epoch
    pub build_epoch: u64,
}

impl DatabaseMetadata {
    /// Human-readable build time, or the raw epoch when out of range.
    pub fn build_time(&self) -> String {
        i64::try_from(self.build_epoch)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| format!("epoch {}", self.build_epoch))
    }
}

/// Extracts metadata from a GeoIP database
pub(crate) fn extract_metadata<T: AsRef<[u8]>>(reader: &Reader<T>, source: &Path) -> DatabaseMetadata {
    DatabaseMetadata {
        source: source.to_string_lossy().to_string(),
        database_type: reader.metadata.database_type.clone(),
        build_epoch: reader.metadata.build_epoch,
    }
}
