//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geoip_enricher` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! Enriched events go to stdout; logs and the run summary go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use geoip_enricher::initialization::init_logger_with;
use geoip_enricher::{run_worker, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A .env in the working directory may carry GEOIP_* settings
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_worker(config).await {
        Ok(report) => {
            eprintln!(
                "Processed {} event{} ({} enriched, {} dropped, {} reloads) in {:.1}s",
                report.total_events,
                if report.total_events == 1 { "" } else { "s" },
                report.enriched,
                report.dropped,
                report.reloads,
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("geoip_enricher error: {:#}", e);
            process::exit(1);
        }
    }
}
