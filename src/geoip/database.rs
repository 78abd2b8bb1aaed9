//! Database engines behind the lookup service.
//!
//! The lookup service only needs two capabilities: open a database, and look
//! an address up in it. Both are expressed as traits so the MaxMind engine can
//! be swapped for an in-memory table in tests.

use maxminddb::Reader;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use super::metadata::{extract_metadata, DatabaseMetadata};
use super::types::{OwnerRecord, PlaceRecord};
use crate::error_handling::GeoIpError;

/// Place-by-IP lookups (City database).
pub trait PlaceDatabase: Send {
    /// Returns the place record for `ip`, or `None` if the database has no entry.
    fn place(&self, ip: IpAddr) -> Result<Option<PlaceRecord>, GeoIpError>;
}

/// Network-owner-by-IP lookups (ASN database).
pub trait OwnerDatabase: Send {
    /// Returns the owning network for `ip`, or `None` if the database has no entry.
    fn owner(&self, ip: IpAddr) -> Result<Option<OwnerRecord>, GeoIpError>;
}

/// Opens fresh database handles from their configured sources.
///
/// Each call must return a new handle reflecting the current contents of the
/// source, so a reload after a refresh picks up new data.
pub trait DatabaseLoader: Send {
    /// Opens the City database.
    fn open_place(&self) -> Result<Box<dyn PlaceDatabase>, GeoIpError>;
    /// Opens the ASN database.
    fn open_owner(&self) -> Result<Box<dyn OwnerDatabase>, GeoIpError>;
}

/// A MaxMind `.mmdb` database held in memory.
pub struct MaxMindDatabase {
    reader: Reader<Vec<u8>>,
    metadata: DatabaseMetadata,
}

impl MaxMindDatabase {
    /// Reads and parses the database at `path`.
    pub fn open(path: &Path) -> Result<Self, GeoIpError> {
        let db_bytes = std::fs::read(path).map_err(|source| GeoIpError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let reader = Reader::from_source(db_bytes).map_err(|e| GeoIpError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let metadata = extract_metadata(&reader, path);
        log::info!(
            "Opened {} database from {} (built {})",
            metadata.database_type,
            metadata.source,
            metadata.build_time()
        );

        Ok(Self { reader, metadata })
    }

    /// Metadata read when the database was opened.
    pub fn metadata(&self) -> &DatabaseMetadata {
        &self.metadata
    }
}

impl PlaceDatabase for MaxMindDatabase {
    fn place(&self, ip: IpAddr) -> Result<Option<PlaceRecord>, GeoIpError> {
        // Members absent from the record map to zero values below.
        let lookup = self
            .reader
            .lookup(ip)
            .map_err(|e| GeoIpError::Lookup(e.to_string()))?;
        if !lookup.has_data() {
            return Ok(None);
        }

        let city: maxminddb::geoip2::City = match lookup
            .decode()
            .map_err(|e| GeoIpError::Lookup(e.to_string()))?
        {
            Some(city) => city,
            None => return Ok(None),
        };

        Ok(Some(PlaceRecord {
            city: city.city.names.english.unwrap_or_default().to_string(),
            iso_code: city.country.iso_code.unwrap_or_default().to_string(),
            country: city.country.names.english.unwrap_or_default().to_string(),
            latitude: city.location.latitude.unwrap_or_default(),
            longitude: city.location.longitude.unwrap_or_default(),
            accuracy_radius: city.location.accuracy_radius.map(u32::from).unwrap_or_default(),
            postal_code: city.postal.code.unwrap_or_default().to_string(),
        }))
    }
}

impl OwnerDatabase for MaxMindDatabase {
    fn owner(&self, ip: IpAddr) -> Result<Option<OwnerRecord>, GeoIpError> {
        let lookup = self
            .reader
            .lookup(ip)
            .map_err(|e| GeoIpError::Lookup(e.to_string()))?;
        if !lookup.has_data() {
            return Ok(None);
        }

        let asn: maxminddb::geoip2::Asn = match lookup
            .decode()
            .map_err(|e| GeoIpError::Lookup(e.to_string()))?
        {
            Some(asn) => asn,
            None => return Ok(None),
        };

        Ok(Some(OwnerRecord {
            as_number: asn.autonomous_system_number.unwrap_or_default(),
            as_org: asn
                .autonomous_system_organization
                .unwrap_or_default()
                .to_string(),
        }))
    }
}

/// Opens the City and ASN databases from local `.mmdb` files.
#[derive(Debug, Clone)]
pub struct MaxMindLoader {
    city_path: PathBuf,
    asn_path: PathBuf,
}

impl MaxMindLoader {
    /// Creates a loader for the City database at `city_path` and the ASN database at `asn_path`.
    pub fn new(city_path: impl Into<PathBuf>, asn_path: impl Into<PathBuf>) -> Self {
        Self {
            city_path: city_path.into(),
            asn_path: asn_path.into(),
        }
    }
}

impl DatabaseLoader for MaxMindLoader {
    /// Opens the City database.
    fn open_place(&self) -> Result<Box<dyn PlaceDatabase>, GeoIpError> {
        Ok(Box::new(MaxMindDatabase::open(&self.city_path)?))
    }

    /// Opens the ASN database.
    fn open_owner(&self) -> Result<Box<dyn OwnerDatabase>, GeoIpError> {
        Ok(Box::new(MaxMindDatabase::open(&self.asn_path)?))
    }
}
