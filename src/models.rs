//! Event wire model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error_handling::EventError;
use crate::geoip::GeoLocation;

/// Location of an event's endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    /// Location of the first source IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<GeoLocation>,
    /// Location of the first destination IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<GeoLocation>,
}

/// A network event as carried on the queues.
///
/// Only the address lists, `device` and `location` are interpreted; every
/// other member is kept as-is. On output those four members come first,
/// followed by the rest in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Tagged source addresses, e.g. `["mac:...", "ipv4:10.0.0.1", "tcp:443"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<Vec<String>>,
    /// Tagged destination addresses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<Vec<String>>,
    /// Reporting device; `debug` events are logged in full
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    /// Attached by the pipeline when a lookup resolves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
    /// Every other member, in input order
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Event {
    /// Decodes an event from JSON bytes.
    pub fn from_slice(msg: &[u8]) -> Result<Self, EventError> {
        serde_json::from_slice(msg).map_err(EventError::Decode)
    }

    /// Encodes the event as JSON.
    pub fn to_vec(&self) -> Result<Vec<u8>, EventError> {
        serde_json::to_vec(self).map_err(EventError::Encode)
    }

    /// Source address list, empty when absent.
    pub fn src_addresses(&self) -> &[String] {
        self.src.as_deref().unwrap_or_default()
    }

    /// Destination address list, empty when absent.
    pub fn dest_addresses(&self) -> &[String] {
        self.dest.as_deref().unwrap_or_default()
    }
}
