//! IP address lookup against the City and ASN databases.
//!
//! `LookupService` owns both database handles. It is mutated only through
//! `&mut self`, so the task that owns it is the only one that can swap handles
//! and no lock is needed around them.

use std::net::IpAddr;
use std::time::Duration;

use super::database::{DatabaseLoader, OwnerDatabase, PlaceDatabase};
use super::types::GeoLocation;
use crate::config::REOPEN_RETRY_INTERVAL;

struct Handles {
    place: Box<dyn PlaceDatabase>,
    owner: Box<dyn OwnerDatabase>,
}

/// Dual-database GeoIP lookup with blocking-retry (re)open.
pub struct LookupService<L> {
    loader: L,
    handles: Option<Handles>,
    retry_interval: Duration,
}

impl<L: DatabaseLoader> LookupService<L> {
    /// Creates a service with no databases open.
    ///
    /// Every lookup returns `None` until `open_blocking()` has completed.
    pub fn new(loader: L) -> Self {
        Self::with_retry_interval(loader, REOPEN_RETRY_INTERVAL)
    }

    /// Like [`new`](Self::new), with a custom wait between open attempts.
    pub fn with_retry_interval(loader: L, retry_interval: Duration) -> Self {
        Self {
            loader,
            handles: None,
            retry_interval,
        }
    }

    /// Opens both databases, retrying each until it succeeds.
    ///
    /// Never returns an error: a missing or corrupt database stalls the caller
    /// until it becomes available. The new handles replace the old pair in a
    /// single assignment once both are open, so lookups never mix a new City
    /// handle with a stale ASN handle.
    pub async fn open_blocking(&mut self) {
        let place = loop {
            match self.loader.open_place() {
                Ok(db) => break db,
                Err(e) => {
                    log::error!("Couldn't open GeoIP City database: {}", e);
                    tokio::time::sleep(self.retry_interval).await;
                }
            }
        };

        let owner = loop {
            match self.loader.open_owner() {
                Ok(db) => break db,
                Err(e) => {
                    log::error!("Couldn't open GeoIP ASN database: {}", e);
                    tokio::time::sleep(self.retry_interval).await;
                }
            }
        };

        self.handles = Some(Handles { place, owner });
        log::debug!("GeoIP databases opened");
    }

    /// Returns true once `open_blocking()` has installed handles.
    pub fn is_open(&self) -> bool {
        self.handles.is_some()
    }

    /// Looks up an address in both databases.
    ///
    /// Returns `None` when the address does not parse, when either database
    /// has no entry or fails, or when the merged record carries no place data.
    pub fn lookup(&self, addr: &str) -> Option<GeoLocation> {
        let ip: IpAddr = addr.parse().ok()?;
        let handles = self.handles.as_ref()?;

        let place = match handles.place.place(ip) {
            Ok(Some(place)) => place,
            Ok(None) => return None,
            Err(e) => {
                log::debug!("City lookup for {} failed: {}", addr, e);
                return None;
            }
        };

        let owner = match handles.owner.owner(ip) {
            Ok(Some(owner)) => owner,
            Ok(None) => return None,
            Err(e) => {
                log::debug!("ASN lookup for {} failed: {}", addr, e);
                return None;
            }
        };

        let location = GeoLocation::merge(place, owner);

        // Don't return an empty record.
        if location.is_empty() {
            return None;
        }

        Some(location)
    }
}
