//! GeoIP lookup using MaxMind GeoLite2 databases.
//!
//! This module provides the dual City/ASN lookup used to enrich events. The
//! databases are opened from local `.mmdb` files that an external updater
//! refreshes; `LookupService::open_blocking` re-reads them on demand.

mod database;
mod lookup;
mod metadata;
mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export public API
pub use database::{DatabaseLoader, MaxMindDatabase, MaxMindLoader, OwnerDatabase, PlaceDatabase};
pub use lookup::LookupService;
pub use metadata::DatabaseMetadata;
pub use types::{GeoLocation, OwnerRecord, PlaceRecord, Position};
