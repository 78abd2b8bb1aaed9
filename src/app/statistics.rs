//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{EventOutcome, PipelineStats};

/// Logs per-outcome counts and reloads for the run.
pub fn print_pipeline_statistics(stats: &PipelineStats, elapsed_seconds: f64) {
    let total = stats.total_events();
    let rate = if elapsed_seconds > 0.0 {
        total as f64 / elapsed_seconds
    } else {
        0.0
    };

    info!(
        "Processed {} events in {:.1}s ({:.1} events/s), {} database reloads",
        total,
        elapsed_seconds,
        rate,
        stats.reload_count()
    );

    for outcome in EventOutcome::iter() {
        let count = stats.get_count(outcome);
        if count > 0 {
            info!("   {}: {}", outcome.as_str(), count);
        }
    }

    let dropped = stats.total_dropped();
    if dropped > 0 {
        log::warn!("{} malformed events were dropped", dropped);
    }
}
