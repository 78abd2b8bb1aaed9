//! Processing statistics tracking.
//!
//! This module provides thread-safe counters for event outcomes and database
//! reloads.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::EventOutcome;

/// Thread-safe pipeline statistics tracker.
///
/// All outcome types are initialized to zero on creation, so counters can be
/// read at any time.
pub struct PipelineStats {
    outcomes: HashMap<EventOutcome, AtomicUsize>,
    reloads: AtomicUsize,
}

impl PipelineStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in EventOutcome::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }

        PipelineStats {
            outcomes,
            reloads: AtomicUsize::new(0),
        }
    }

    /// Increment an outcome counter.
    pub fn record(&self, outcome: EventOutcome) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment outcome counter for {:?} which is not in the map. \
                 This indicates a bug in PipelineStats initialization.",
                outcome
            );
        }
    }

    /// Increment the database reload counter.
    pub fn record_reload(&self) {
        self.reloads.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the count for an outcome.
    pub fn get_count(&self, outcome: EventOutcome) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of database reloads performed.
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    /// Total events seen, forwarded or dropped.
    pub fn total_events(&self) -> usize {
        EventOutcome::iter().map(|o| self.get_count(o)).sum()
    }

    /// Events dropped without being forwarded.
    pub fn total_dropped(&self) -> usize {
        EventOutcome::iter()
            .filter(|o| o.is_dropped())
            .map(|o| self.get_count(o))
            .sum()
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new()
    }
}
