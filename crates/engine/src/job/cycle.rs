//! One poll cycle for one source: fetch → classify → dispatch → advance.
//!
//! Every failure is scoped to this cycle and this source. The cursor only
//! moves after the whole pass succeeded, so a failed cycle re-reads the
//! same lines next tick; the sink sees them again (at-least-once) rather
//! than never.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{debug, info, trace, warn};

use crate::client::FetchError;
use crate::dispatch::CycleDispatcher;
use crate::state::{EngineState, SourceEntry};

pub async fn run_cycle(state: &EngineState, entry: &SourceEntry) {
    let cursor = state.cursors.current(&entry.key);
    let fetch = state.source.fetch_since(&entry.path, cursor);
    let fetch_timeout = Duration::from_secs(state.config.fetch_timeout_secs);

    let batch = match time::timeout(fetch_timeout, fetch).await {
        Ok(Ok(batch)) => batch,
        Ok(Err(FetchError::NotFound)) => {
            warn!(source = %entry.key, path = %entry.path, "log file not found");
            state.metrics.record_cycle_failure();
            return;
        }
        Ok(Err(FetchError::Truncated)) => {
            // Rotation: the file shrank below the cursor. Reset and let the
            // next cycle read the new file from the start.
            info!(source = %entry.key, cursor, "log rotated, resetting cursor");
            state.cursors.reset(&entry.key);
            state.metrics.record_rotation();
            return;
        }
        Ok(Err(FetchError::Transient(cause))) => {
            warn!(source = %entry.key, %cause, "fetch failed, will retry next cycle");
            state.metrics.record_cycle_failure();
            return;
        }
        Err(_) => {
            warn!(
                source = %entry.key,
                timeout_secs = state.config.fetch_timeout_secs,
                "fetch timed out, will retry next cycle"
            );
            state.metrics.record_cycle_failure();
            return;
        }
    };

    let mut dispatcher = CycleDispatcher::new(
        &*state.sink,
        &state.metrics,
        &state.config.dispatch,
        Arc::clone(&entry.key),
    );
    let mut events = 0usize;
    for line in &batch.lines {
        match state.classifier.classify(&entry.key, line) {
            Some(event) => {
                state.metrics.record_line(true);
                events += 1;
                dispatcher.dispatch(event).await;
            }
            None => {
                state.metrics.record_line(false);
                trace!(source = %entry.key, %line, "unmatched line");
            }
        }
    }
    dispatcher.finish().await;

    state.cursors.advance(&entry.key, batch.new_cursor);
    state.metrics.record_cycle();
    debug!(
        source = %entry.key,
        lines = batch.lines.len(),
        events,
        cursor = batch.new_cursor,
        "cycle complete"
    );
}
