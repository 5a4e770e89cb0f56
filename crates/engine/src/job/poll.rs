//! Poll scheduler.
//!
//! A single interval drives every registered source. Each tick spawns one
//! task per source so a slow or failing source never delays the others;
//! a per-source `try_lock` guard keeps at most one cycle in flight per
//! key. The tick cadence is fixed; cycles that outlive the interval are
//! skipped for that source, not queued.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::SharedState;

use super::cycle;

/// Background task driving periodic poll cycles until the task is
/// aborted. The initial delay staggers this job against other periodic
/// work in the host process.
pub async fn run_poll_loop(state: SharedState) {
    if state.config.initial_delay_secs > 0 {
        time::sleep(Duration::from_secs(state.config.initial_delay_secs)).await;
    }
    info!(
        interval_secs = state.config.poll_interval_secs,
        "poll loop started"
    );

    let mut interval = time::interval(Duration::from_secs(state.config.poll_interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        poll_once(&state).await;
    }
}

/// Run one tick: a cycle per registered source, each in its own task with
/// its own error boundary. Returns once every spawned cycle has finished
/// or been skipped.
pub async fn poll_once(state: &SharedState) {
    let mut handles = Vec::new();
    for entry in state.registry.snapshot() {
        let state = Arc::clone(state);
        handles.push(tokio::spawn(async move {
            match entry.in_flight.try_lock() {
                Ok(_guard) => cycle::run_cycle(&state, &entry).await,
                Err(_) => {
                    debug!(source = %entry.key, "previous cycle still in flight, skipping");
                }
            }
        }));
    }
    for handle in handles {
        // A panic inside one cycle is contained by its task; log it and
        // keep going.
        if let Err(err) = handle.await {
            error!(error = %err, "poll cycle task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeLineSource;
    use crate::client::{FetchError, LineSource};
    use crate::conf::EngineConfig;
    use crate::dispatch::fake::RecordingSink;
    use crate::dispatch::{Notification, NotificationSink};
    use crate::state::EngineState;

    fn shared(source: Arc<FakeLineSource>, sink: Arc<RecordingSink>) -> SharedState {
        Arc::new(EngineState::new(
            EngineConfig::default(),
            source as Arc<dyn LineSource>,
            sink as Arc<dyn NotificationSink>,
        ))
    }

    #[tokio::test]
    async fn one_tick_polls_every_source() {
        let source = Arc::new(FakeLineSource::new());
        let sink = Arc::new(RecordingSink::new());
        source.set_lines("/logs/a.log", &["LogSFPS: AirDrop switched to Flying"]);
        source.set_lines("/logs/b.log", &["LogSFPS: AirDrop switched to Waiting"]);
        let state = shared(Arc::clone(&source), Arc::clone(&sink));
        state.register_source("alpha", "/logs/a.log");
        state.register_source("beta", "/logs/b.log");

        poll_once(&state).await;

        assert_eq!(sink.len(), 2);
        assert_eq!(state.cursors.current("alpha"), 1);
        assert_eq!(state.cursors.current("beta"), 1);
    }

    #[tokio::test]
    async fn one_failing_source_does_not_block_the_other() {
        let source = Arc::new(FakeLineSource::new());
        let sink = Arc::new(RecordingSink::new());
        source.set_lines("/logs/a.log", &["LogSFPS: AirDrop switched to Flying"]);
        source.set_lines("/logs/b.log", &["LogSFPS: AirDrop switched to Waiting"]);
        source.push_failure("/logs/a.log", FetchError::Transient("io".to_string()));
        let state = shared(Arc::clone(&source), Arc::clone(&sink));
        state.register_source("alpha", "/logs/a.log");
        state.register_source("beta", "/logs/b.log");

        poll_once(&state).await;

        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        match &delivered[0] {
            Notification::Event(event) => assert_eq!(&*event.source_key, "beta"),
            other => panic!("expected event, got {other:?}"),
        }
        assert_eq!(state.cursors.current("alpha"), 0);
        assert_eq!(state.cursors.current("beta"), 1);
    }

    #[tokio::test]
    async fn in_flight_source_is_skipped() {
        let source = Arc::new(FakeLineSource::new());
        let sink = Arc::new(RecordingSink::new());
        source.set_lines("/logs/a.log", &["LogSFPS: AirDrop switched to Flying"]);
        let state = shared(Arc::clone(&source), Arc::clone(&sink));
        state.register_source("alpha", "/logs/a.log");

        let entry = state.registry.snapshot().remove(0);
        let guard = entry.in_flight.lock().await;
        poll_once(&state).await;
        assert!(sink.is_empty());

        drop(guard);
        poll_once(&state).await;
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn deregistered_source_is_not_polled() {
        let source = Arc::new(FakeLineSource::new());
        let sink = Arc::new(RecordingSink::new());
        source.set_lines("/logs/a.log", &["LogSFPS: AirDrop switched to Flying"]);
        let state = shared(Arc::clone(&source), Arc::clone(&sink));
        state.register_source("alpha", "/logs/a.log");
        state.deregister_source("alpha");

        poll_once(&state).await;
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn empty_registry_tick_is_a_no_op() {
        let source = Arc::new(FakeLineSource::new());
        let sink = Arc::new(RecordingSink::new());
        let state = shared(source, Arc::clone(&sink));

        poll_once(&state).await;
        assert!(sink.is_empty());
        assert_eq!(state.metrics.snapshot().cycles_completed, 0);
    }
}
