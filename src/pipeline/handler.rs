//! Per-event enrichment.

use anyhow::Result;
use std::sync::Arc;

use super::extract::first_ip_address;
use super::sink::OutputSink;
use crate::config::{DEBUG_DEVICE, OUTPUT_DESTINATION};
use crate::error_handling::{EventOutcome, PipelineStats};
use crate::geoip::{DatabaseLoader, LookupService};
use crate::models::{Event, LocationInfo};
use crate::refresh::RefreshListener;

/// Enriches events with source and destination locations.
///
/// Owns the lookup service outright. Reloads requested by the updater are
/// applied here, between events, so no event ever sees a half-swapped pair of
/// databases.
pub struct EnrichmentPipeline<L> {
    lookup: LookupService<L>,
    reload: RefreshListener,
    stats: Arc<PipelineStats>,
}

impl<L: DatabaseLoader> EnrichmentPipeline<L> {
    /// Creates a pipeline; call [`start`](Self::start) before handling events.
    pub fn new(lookup: LookupService<L>, reload: RefreshListener, stats: Arc<PipelineStats>) -> Self {
        Self {
            lookup,
            reload,
            stats,
        }
    }

    /// Opens the databases; blocks until both are available.
    pub async fn start(&mut self) {
        self.lookup.open_blocking().await;
    }

    /// The lookup service this pipeline owns.
    pub fn lookup_service(&self) -> &LookupService<L> {
        &self.lookup
    }

    /// Outcome counters.
    pub fn stats(&self) -> &Arc<PipelineStats> {
        &self.stats
    }

    /// Reopens the databases if the updater has signalled a refresh.
    ///
    /// Returns true if a reload happened.
    pub async fn reload_if_pending(&mut self) -> bool {
        if !self.reload.take_pending() {
            return false;
        }

        log::info!("An update occurred - reopening database.");
        self.lookup.open_blocking().await;
        self.stats.record_reload();
        true
    }

    /// Looks up the event's source and destination addresses and attaches
    /// whatever was found.
    ///
    /// Returns true if a location was attached. When neither side resolves,
    /// the event's `location` is left exactly as it was.
    pub fn enrich(&self, event: &mut Event) -> bool {
        let src = first_ip_address(event.src_addresses());
        let dest = first_ip_address(event.dest_addresses());

        let source = self.lookup.lookup(src);
        let destination = self.lookup.lookup(dest);

        if source.is_none() && destination.is_none() {
            return false;
        }

        event.location = Some(LocationInfo {
            source,
            destination,
        });
        true
    }

    /// Processes one inbound message.
    ///
    /// Malformed input is logged and dropped, so the only error that can come
    /// back is the sink's own.
    pub async fn handle<S: OutputSink>(&mut self, msg: &[u8], sink: &mut S) -> Result<EventOutcome> {
        self.reload_if_pending().await;

        let mut event = match Event::from_slice(msg) {
            Ok(event) => event,
            Err(e) => {
                log::warn!("{}", e);
                self.stats.record(EventOutcome::DecodeFailed);
                return Ok(EventOutcome::DecodeFailed);
            }
        };

        if event.device.as_deref() == Some(DEBUG_DEVICE) {
            log::info!("{}", String::from_utf8_lossy(msg));
        }

        let outcome = if self.enrich(&mut event) {
            EventOutcome::Enriched
        } else {
            EventOutcome::Unenriched
        };

        let payload = match event.to_vec() {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("{}", e);
                self.stats.record(EventOutcome::EncodeFailed);
                return Ok(EventOutcome::EncodeFailed);
            }
        };

        sink.send(OUTPUT_DESTINATION, payload)?;
        self.stats.record(outcome);
        Ok(outcome)
    }
}
