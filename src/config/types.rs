//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration. Every option can also be set through an environment
//! variable so the worker can be configured from the container environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_ASN_DB, DEFAULT_CITY_DB, DEFAULT_DATABASE_DIR, DEFAULT_UPDATE_CONFIG,
    DEFAULT_UPDATE_PROGRAM, REFRESH_BACKOFF, REFRESH_PERIOD, REOPEN_RETRY_INTERVAL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Worker configuration.
///
/// Parsed from the command line (with environment fallbacks) by the binary,
/// or constructed programmatically by library users.
///
/// # Examples
///
/// ```bash
/// # Enrich events from stdin with databases in the working directory
/// geoip_enricher < events.ndjson
///
/// # Explicit database locations, no background refresh
/// GEOIP_DB=/data/GeoLite2-City.mmdb geoip_enricher --asn-db /data/GeoLite2-ASN.mmdb --no-refresh
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geoip_enricher",
    about = "Enriches network events with GeoIP location and ASN data."
)]
pub struct Config {
    /// File to read events from (NDJSON); `-` reads stdin
    #[arg(long, value_parser, default_value = "-")]
    pub input: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// GeoIP City database (.mmdb)
    #[arg(long, env = "GEOIP_DB", default_value = DEFAULT_CITY_DB)]
    pub city_db: PathBuf,

    /// GeoIP ASN database (.mmdb)
    #[arg(long, env = "GEOIP_ASN_DB", default_value = DEFAULT_ASN_DB)]
    pub asn_db: PathBuf,

    /// Executable run periodically to refresh the databases
    #[arg(long, env = "GEOIP_UPDATE_PROGRAM", default_value = DEFAULT_UPDATE_PROGRAM)]
    pub update_program: String,

    /// Config file handed to the update executable
    #[arg(long, env = "GEOIP_UPDATE_CONFIG", default_value = DEFAULT_UPDATE_CONFIG)]
    pub update_config: PathBuf,

    /// Directory the update executable writes databases into
    #[arg(long, env = "GEOIP_DATABASE_DIR", default_value = DEFAULT_DATABASE_DIR)]
    pub database_dir: PathBuf,

    /// Seconds between successful refreshes
    #[arg(
        long,
        env = "GEOIP_REFRESH_PERIOD_SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = REFRESH_PERIOD.as_secs()
    )]
    pub refresh_period_secs: u64,

    /// Seconds to wait after a failed refresh
    #[arg(
        long,
        env = "GEOIP_REFRESH_BACKOFF_SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = REFRESH_BACKOFF.as_secs()
    )]
    pub refresh_backoff_secs: u64,

    /// Seconds between attempts to open a database
    #[arg(
        long,
        env = "GEOIP_REOPEN_RETRY_SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        default_value_t = REOPEN_RETRY_INTERVAL.as_secs()
    )]
    pub reopen_retry_secs: u64,

    /// Disable the background database refresh
    #[arg(long)]
    pub no_refresh: bool,
}

impl Config {
    /// Wait between successful refreshes.
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_period_secs)
    }

    /// Wait after a failed refresh.
    pub fn refresh_backoff(&self) -> Duration {
        Duration::from_secs(self.refresh_backoff_secs)
    }

    /// Wait between database open attempts.
    pub fn reopen_retry_interval(&self) -> Duration {
        Duration::from_secs(self.reopen_retry_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            city_db: PathBuf::from(DEFAULT_CITY_DB),
            asn_db: PathBuf::from(DEFAULT_ASN_DB),
            update_program: DEFAULT_UPDATE_PROGRAM.to_string(),
            update_config: PathBuf::from(DEFAULT_UPDATE_CONFIG),
            database_dir: PathBuf::from(DEFAULT_DATABASE_DIR),
            refresh_period_secs: REFRESH_PERIOD.as_secs(),
            refresh_backoff_secs: REFRESH_BACKOFF.as_secs(),
            reopen_retry_secs: REOPEN_RETRY_INTERVAL.as_secs(),
            no_refresh: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.city_db, PathBuf::from("GeoLite2-City.mmdb"));
        assert_eq!(config.asn_db, PathBuf::from("GeoLite2-ASN.mmdb"));
        assert_eq!(config.refresh_period(), Duration::from_secs(86400));
        assert_eq!(config.refresh_backoff(), Duration::from_secs(60));
        assert_eq!(config.reopen_retry_interval(), Duration::from_secs(10));
        assert!(!config.no_refresh);
    }

    #[test]
    fn test_parse_overrides() {
        let config = Config::try_parse_from([
            "geoip_enricher",
            "--city-db",
            "/data/city.mmdb",
            "--asn-db",
            "/data/asn.mmdb",
            "--refresh-backoff-secs",
            "5",
            "--no-refresh",
            "--log-format",
            "json",
        ])
        .expect("valid arguments");

        assert_eq!(config.city_db, PathBuf::from("/data/city.mmdb"));
        assert_eq!(config.asn_db, PathBuf::from("/data/asn.mmdb"));
        assert_eq!(config.refresh_backoff(), Duration::from_secs(5));
        assert!(config.no_refresh);
        assert!(matches!(config.log_format, LogFormat::Json));
    }

    #[test]
    fn test_parse_rejects_zero_durations() {
        for flag in [
            "--refresh-period-secs",
            "--refresh-backoff-secs",
            "--reopen-retry-secs",
        ] {
            let result = Config::try_parse_from(["geoip_enricher", flag, "0"]);
            assert!(result.is_err(), "{} 0 should be rejected", flag);
        }
        let config = Config::try_parse_from(["geoip_enricher", "--reopen-retry-secs", "1"])
            .expect("1 is accepted");
        assert_eq!(config.reopen_retry_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_rejects_bad_duration() {
        let result = Config::try_parse_from(["geoip_enricher", "--reopen-retry-secs", "soon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_log_level() {
        let result = Config::try_parse_from(["geoip_enricher", "--log-level", "verbose"]);
        assert!(result.is_err());
    }
}
