//! Run — drive the poll loop until shutdown.

use std::sync::Arc;

use tracing::info;

use crate::job;
use crate::state::SharedState;

/// Spawn the poll loop and run until ctrl-c. The loop task is aborted on
/// shutdown; a cycle in flight inside the task ends with it, and the
/// cursors it had not advanced are re-read by the next process.
pub async fn run(state: SharedState) -> Result<(), Box<dyn std::error::Error>> {
    let poller = tokio::spawn(job::run_poll_loop(Arc::clone(&state)));

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    poller.abort();

    let snapshot = state.metrics.snapshot();
    info!(
        lines = snapshot.lines_processed,
        events = snapshot.events_classified,
        cycles = snapshot.cycles_completed,
        "engine stopped"
    );
    Ok(())
}
