//! geoip_enricher library: GeoIP enrichment of network events
//!
//! This library reads network events, looks up the first source and
//! destination IP address of each in MaxMind GeoLite2 City and ASN databases,
//! attaches the resulting location, and forwards the event. A background task
//! refreshes the databases periodically; the pipeline reopens them between
//! events when told a refresh succeeded.
//!
//! # Example
//!
//! ```no_run
//! use geoip_enricher::{run_worker, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("events.ndjson"),
//!     no_refresh: true,
//!     ..Default::default()
//! };
//!
//! let report = run_worker(config).await?;
//! println!("Enriched {} of {} events", report.enriched, report.total_events);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod error_handling;
pub mod geoip;
pub mod initialization;
pub mod models;
pub mod pipeline;
pub mod refresh;

// Re-export public API
pub use app::process_lines;
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{EventOutcome, PipelineStats};
pub use geoip::{GeoLocation, LookupService, MaxMindLoader};
pub use models::{Event, LocationInfo};
pub use pipeline::{EnrichmentPipeline, LineSink, OutputSink};
pub use refresh::{refresh_signal, GeoIpUpdateCommand, ReferenceDataUpdater, RefreshSchedule};
pub use run::{run_worker, WorkerReport};

// Internal run module (wires the updater, lookup service and pipeline together)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use std::sync::Arc;
    use tokio::io::BufReader;
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        cancel_on_interrupt, print_pipeline_statistics, process_lines, shutdown_gracefully,
    };
    use crate::config::{Config, REFRESH_SIGNAL_CAPACITY};
    use crate::error_handling::{EventOutcome, PipelineStats};
    use crate::geoip::{LookupService, MaxMindLoader};
    use crate::pipeline::{EnrichmentPipeline, LineSink};
    use crate::refresh::{refresh_signal, GeoIpUpdateCommand, ReferenceDataUpdater, RefreshSchedule};

    /// Results of a worker run.
    #[derive(Debug, Clone)]
    pub struct WorkerReport {
        /// Events read from the input (including dropped ones)
        pub total_events: usize,
        /// Events forwarded with a location attached
        pub enriched: usize,
        /// Malformed events that were dropped
        pub dropped: usize,
        /// Number of database reloads after refreshes
        pub reloads: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl WorkerReport {
        fn from_stats(stats: &PipelineStats, elapsed_seconds: f64) -> Self {
            Self {
                total_events: stats.total_events(),
                enriched: stats.get_count(EventOutcome::Enriched),
                dropped: stats.total_dropped(),
                reloads: stats.reload_count(),
                elapsed_seconds,
            }
        }
    }

    /// Runs the enrichment worker with the provided configuration.
    ///
    /// Opens the GeoIP databases (waiting until they exist), starts the
    /// background updater unless disabled, then enriches newline-delimited
    /// events from `config.input` to stdout until the input ends or the
    /// process is interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be opened or read, or if writing
    /// to stdout fails. Database and refresh failures are retried, never
    /// returned.
    pub async fn run_worker(config: Config) -> Result<WorkerReport> {
        let start_time = std::time::Instant::now();
        let stats = Arc::new(PipelineStats::new());
        let cancel = CancellationToken::new();

        // Notification channel: the updater posts after every successful
        // refresh, the pipeline drains it before each event.
        let (notifier, listener) = refresh_signal(REFRESH_SIGNAL_CAPACITY);

        let updater_task = if config.no_refresh {
            info!("GeoIP refresh disabled");
            None
        } else {
            let schedule = RefreshSchedule::from_config(&config);
            info!(
                "GeoIP refresh every {}s (retry after {}s on failure)",
                schedule.period.as_secs(),
                schedule.backoff.as_secs()
            );
            let updater = ReferenceDataUpdater::new(
                GeoIpUpdateCommand::from_config(&config),
                notifier,
                schedule,
            );
            Some(updater.spawn(cancel.child_token()))
        };

        let interrupt_task = cancel_on_interrupt(cancel.clone());

        let loader = MaxMindLoader::new(&config.city_db, &config.asn_db);
        let lookup = LookupService::with_retry_interval(loader, config.reopen_retry_interval());
        let mut pipeline = EnrichmentPipeline::new(lookup, listener, Arc::clone(&stats));

        tokio::select! {
            _ = pipeline.start() => {}
            _ = cancel.cancelled() => {
                info!("Interrupted before the GeoIP databases could be opened");
                shutdown_gracefully(cancel, updater_task).await;
                let _ = interrupt_task.await;
                return Ok(WorkerReport::from_stats(&stats, start_time.elapsed().as_secs_f64()));
            }
        }

        info!("Initialisation complete.");

        let mut sink = LineSink::new(std::io::stdout());
        let result = if config.input.as_os_str() == "-" {
            info!("Reading events from stdin");
            process_lines(BufReader::new(tokio::io::stdin()), &mut pipeline, &mut sink, &cancel).await
        } else {
            let file = tokio::fs::File::open(&config.input)
                .await
                .with_context(|| format!("Failed to open input file {:?}", config.input))?;
            info!("Reading events from {:?}", config.input);
            process_lines(BufReader::new(file), &mut pipeline, &mut sink, &cancel).await
        };
        let flushed = sink.flush();

        shutdown_gracefully(cancel, updater_task).await;
        let _ = interrupt_task.await;

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_pipeline_statistics(&stats, elapsed_seconds);

        result.context("Event handling failed")?;
        flushed?;

        Ok(WorkerReport::from_stats(&stats, elapsed_seconds))
    }
}
