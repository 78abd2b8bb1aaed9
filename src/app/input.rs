//! Line-oriented event input.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

use crate::geoip::DatabaseLoader;
use crate::pipeline::{EnrichmentPipeline, OutputSink};

/// Feeds newline-delimited events through the pipeline until the input ends
/// or `cancel` fires.
///
/// Blank lines are skipped. Returns the number of events handed to the
/// pipeline.
///
/// # Errors
///
/// Returns an error if reading the input fails or the sink rejects an event.
pub async fn process_lines<R, L, S>(
    reader: R,
    pipeline: &mut EnrichmentPipeline<L>,
    sink: &mut S,
    cancel: &CancellationToken,
) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    L: DatabaseLoader,
    S: OutputSink,
{
    let mut segments = reader.split(b'\n');
    let mut count = 0usize;

    loop {
        let segment = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            segment = segments.next_segment() => segment,
        };

        let Some(line) = segment.context("Failed to read event from input")? else {
            break;
        };

        let msg = line.trim_ascii();
        if msg.is_empty() {
            continue;
        }

        // A pending reload may stall in open_blocking; the old handles stay
        // installed until both new ones open, so abandoning it is safe.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            handled = pipeline.handle(msg, sink) => {
                handled?;
            }
        }
        count += 1;
    }

    Ok(count)
}
