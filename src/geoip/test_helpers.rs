//! Shared test helpers for GeoIP and pipeline tests.
//!
//! Provides an in-memory database that implements the engine traits, so
//! lookups and reloads can be tested without `.mmdb` files.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::database::{DatabaseLoader, OwnerDatabase, PlaceDatabase};
use super::types::{OwnerRecord, PlaceRecord};
use crate::error_handling::GeoIpError;

/// Contents of both databases.
#[derive(Clone, Default)]
pub struct Table {
    pub places: HashMap<IpAddr, PlaceRecord>,
    pub owners: HashMap<IpAddr, OwnerRecord>,
    /// Addresses whose City lookup fails inside the engine
    pub failing: Vec<IpAddr>,
}

struct TablePlace(Table);
struct TableOwner(Table);

impl PlaceDatabase for TablePlace {
    fn place(&self, ip: IpAddr) -> Result<Option<PlaceRecord>, GeoIpError> {
        if self.0.failing.contains(&ip) {
            return Err(GeoIpError::Lookup("corrupt search tree".to_string()));
        }
        Ok(self.0.places.get(&ip).cloned())
    }
}

impl OwnerDatabase for TableOwner {
    fn owner(&self, ip: IpAddr) -> Result<Option<OwnerRecord>, GeoIpError> {
        Ok(self.0.owners.get(&ip).cloned())
    }
}

/// Loader serving a snapshot of the current table on every open.
///
/// Clones share state, so a test can keep one clone to swap the table
/// ("refresh the file") and count opens.
#[derive(Clone)]
pub struct TableLoader {
    pub table: Arc<Mutex<Table>>,
    /// Number of upcoming opens that fail
    pub failures: Arc<AtomicUsize>,
    /// Total open attempts, successful or not
    pub opens: Arc<AtomicUsize>,
}

impl TableLoader {
    pub fn new(table: Table) -> Self {
        Self {
            table: Arc::new(Mutex::new(table)),
            failures: Arc::new(AtomicUsize::new(0)),
            opens: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replaces what the next open will see.
    pub fn replace(&self, table: Table) {
        *self.table.lock().expect("lock") = table;
    }

    fn snapshot(&self) -> Result<Table, GeoIpError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(GeoIpError::Open {
                path: "GeoLite2-City.mmdb".into(),
                message: "not yet downloaded".to_string(),
            });
        }
        Ok(self.table.lock().expect("lock").clone())
    }
}

impl DatabaseLoader for TableLoader {
    fn open_place(&self) -> Result<Box<dyn PlaceDatabase>, GeoIpError> {
        Ok(Box::new(TablePlace(self.snapshot()?)))
    }

    fn open_owner(&self) -> Result<Box<dyn OwnerDatabase>, GeoIpError> {
        Ok(Box::new(TableOwner(self.snapshot()?)))
    }
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid ip")
}

pub fn mountain_view() -> PlaceRecord {
    PlaceRecord {
        city: "Mountain View".to_string(),
        iso_code: "US".to_string(),
        country: "United States".to_string(),
        latitude: 37.386,
        longitude: -122.0838,
        accuracy_radius: 1000,
        postal_code: "94035".to_string(),
    }
}

/// A table covering the interesting cases:
/// - `8.8.8.8`: full City and ASN data
/// - `1.1.1.1`: ASN data only (counts as empty)
/// - `2001:4860:4860::8888`: country only, no ASN data in the record
/// - `9.9.9.9`: City entry but no ASN entry
pub fn sample_table() -> Table {
    let mut table = Table::default();
    table.places.insert(ip("8.8.8.8"), mountain_view());
    table.owners.insert(
        ip("8.8.8.8"),
        OwnerRecord {
            as_number: 15169,
            as_org: "GOOGLE".to_string(),
        },
    );
    table.places.insert(ip("1.1.1.1"), PlaceRecord::default());
    table.owners.insert(
        ip("1.1.1.1"),
        OwnerRecord {
            as_number: 13335,
            as_org: "CLOUDFLARENET".to_string(),
        },
    );
    table.places.insert(
        ip("2001:4860:4860::8888"),
        PlaceRecord {
            iso_code: "US".to_string(),
            country: "United States".to_string(),
            ..Default::default()
        },
    );
    table
        .owners
        .insert(ip("2001:4860:4860::8888"), OwnerRecord::default());
    table.places.insert(
        ip("9.9.9.9"),
        PlaceRecord {
            city: "Berkeley".to_string(),
            ..Default::default()
        },
    );
    table
}
