//! GeoIP data structures.
//!
//! This module defines the raw records returned by the City and ASN databases
//! and the merged `GeoLocation` that is attached to events.

use serde::{Deserialize, Serialize};

/// Place data from the City database.
///
/// Missing values are represented by their zero value, matching what ends up
/// on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceRecord {
    /// City name (English)
    pub city: String,
    /// ISO 3166-1 alpha-2 country code
    pub iso_code: String,
    /// Country name (English)
    pub country: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Accuracy radius in kilometers
    pub accuracy_radius: u32,
    /// Postal code
    pub postal_code: String,
}

/// Network-owner data from the ASN database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerRecord {
    /// Autonomous system number
    pub as_number: u32,
    /// Autonomous system organization
    pub as_org: String,
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: f64,
}

/// Merged place and network-owner record for a single address.
///
/// Serialized in camelCase; absent members decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    /// City name
    #[serde(default)]
    pub city: String,
    /// ISO country code
    #[serde(default)]
    pub iso_code: String,
    /// Country name
    #[serde(default)]
    pub country: String,
    /// Coordinates
    #[serde(default)]
    pub position: Position,
    /// Accuracy radius in kilometers
    #[serde(default)]
    pub accuracy_radius: u32,
    /// Postal code
    #[serde(default)]
    pub postal_code: String,
    /// Autonomous system number
    #[serde(default)]
    pub as_number: u32,
    /// Autonomous system organization
    #[serde(default)]
    pub as_org: String,
}

impl GeoLocation {
    /// Builds a location from the two database records.
    pub fn merge(place: PlaceRecord, owner: OwnerRecord) -> Self {
        Self {
            city: place.city,
            iso_code: place.iso_code,
            country: place.country,
            position: Position {
                latitude: place.latitude,
                longitude: place.longitude,
            },
            accuracy_radius: place.accuracy_radius,
            postal_code: place.postal_code,
            as_number: owner.as_number,
            as_org: owner.as_org,
        }
    }

    /// Returns true when none of the place fields carry data.
    ///
    /// The AS number and organization are not considered: a record with only
    /// ownership data still counts as empty and is never attached to an event.
    pub fn is_empty(&self) -> bool {
        self.city.is_empty()
            && self.iso_code.is_empty()
            && self.country.is_empty()
            && self.position.latitude == 0.0
            && self.position.longitude == 0.0
            && self.accuracy_radius == 0
            && self.postal_code.is_empty()
    }
}
