// Shared test helpers for in-memory databases and sinks.
//
// Integration tests cannot see the crate's #[cfg(test)] helpers, so this
// module implements the public engine traits itself.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use geoip_enricher::error_handling::GeoIpError;
use geoip_enricher::geoip::{
    DatabaseLoader, OwnerDatabase, OwnerRecord, PlaceDatabase, PlaceRecord,
};
use geoip_enricher::OutputSink;

/// City and ASN contents served by [`MemoryLoader`].
#[derive(Clone, Default)]
pub struct Snapshot {
    pub places: HashMap<IpAddr, PlaceRecord>,
    pub owners: HashMap<IpAddr, OwnerRecord>,
}

struct SnapshotPlace(Snapshot);
struct SnapshotOwner(Snapshot);

impl PlaceDatabase for SnapshotPlace {
    fn place(&self, ip: IpAddr) -> Result<Option<PlaceRecord>, GeoIpError> {
        Ok(self.0.places.get(&ip).cloned())
    }
}

impl OwnerDatabase for SnapshotOwner {
    fn owner(&self, ip: IpAddr) -> Result<Option<OwnerRecord>, GeoIpError> {
        Ok(self.0.owners.get(&ip).cloned())
    }
}

/// Loader whose contents can be swapped to stand in for a refreshed file.
#[derive(Clone, Default)]
pub struct MemoryLoader {
    current: Arc<Mutex<Snapshot>>,
}

impl MemoryLoader {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: Arc::new(Mutex::new(snapshot)),
        }
    }

    #[allow(dead_code)] // Used by some test files
    pub fn replace(&self, snapshot: Snapshot) {
        *self.current.lock().expect("lock") = snapshot;
    }

    fn snapshot(&self) -> Snapshot {
        self.current.lock().expect("lock").clone()
    }
}

impl DatabaseLoader for MemoryLoader {
    fn open_place(&self) -> Result<Box<dyn PlaceDatabase>, GeoIpError> {
        Ok(Box::new(SnapshotPlace(self.snapshot())))
    }

    fn open_owner(&self) -> Result<Box<dyn OwnerDatabase>, GeoIpError> {
        Ok(Box::new(SnapshotOwner(self.snapshot())))
    }
}

/// Sink collecting everything sent, with its destination.
#[derive(Default)]
pub struct CollectingSink {
    pub sent: Vec<(String, serde_json::Value)>,
}

impl OutputSink for CollectingSink {
    fn send(&mut self, destination: &str, payload: Vec<u8>) -> anyhow::Result<()> {
        let value = serde_json::from_slice(&payload)?;
        self.sent.push((destination.to_string(), value));
        Ok(())
    }
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid ip")
}

pub fn place(city: &str, iso_code: &str, country: &str) -> PlaceRecord {
    PlaceRecord {
        city: city.to_string(),
        iso_code: iso_code.to_string(),
        country: country.to_string(),
        latitude: 51.5,
        longitude: -0.12,
        accuracy_radius: 50,
        postal_code: String::new(),
    }
}

pub fn owner(as_number: u32, as_org: &str) -> OwnerRecord {
    OwnerRecord {
        as_number,
        as_org: as_org.to_string(),
    }
}

/// `81.2.69.142` resolves to London; `10.0.0.1` is not in the databases.
pub fn london_snapshot() -> Snapshot {
    let mut snapshot = Snapshot::default();
    snapshot
        .places
        .insert(ip("81.2.69.142"), place("London", "GB", "United Kingdom"));
    snapshot
        .owners
        .insert(ip("81.2.69.142"), owner(20712, "Andrews & Arnold Ltd"));
    snapshot
}
