//! Configuration constants.
//!
//! This module defines the defaults for database paths, refresh timing and the
//! names used on the wire.

use std::time::Duration;

/// Default City database file (relative to the working directory)
pub const DEFAULT_CITY_DB: &str = "GeoLite2-City.mmdb";
/// Default ASN database file
pub const DEFAULT_ASN_DB: &str = "GeoLite2-ASN.mmdb";

/// Executable that refreshes the databases in place
pub const DEFAULT_UPDATE_PROGRAM: &str = "geoipupdate";
/// Config file passed to the update executable with `-f`
pub const DEFAULT_UPDATE_CONFIG: &str = "GeoIP.conf";
/// Database directory passed to the update executable with `-d`
pub const DEFAULT_DATABASE_DIR: &str = ".";

/// Wait between successful refreshes (one day)
pub const REFRESH_PERIOD: Duration = Duration::from_secs(86400);
/// Wait after a failed refresh before trying again
pub const REFRESH_BACKOFF: Duration = Duration::from_secs(60);
/// Wait between attempts to open a database that failed to open
pub const REOPEN_RETRY_INTERVAL: Duration = Duration::from_secs(10);

/// Capacity of the refresh notification channel.
/// Posts beyond this are dropped; one pending notification is enough to
/// trigger a reload.
pub const REFRESH_SIGNAL_CAPACITY: usize = 2;

/// Sink destination that enriched events are sent to
pub const OUTPUT_DESTINATION: &str = "output";

/// Events from this device have their raw message logged
pub const DEBUG_DEVICE: &str = "debug";

/// Address-list prefixes that mark an IP literal
pub const IPV4_TAG: &str = "ipv4:";
/// See [`IPV4_TAG`]
pub const IPV6_TAG: &str = "ipv6:";
