//! Engine state — EngineState struct, shared state type alias.

use std::sync::Arc;

use crate::classify::Classifier;
use crate::client::LineSource;
use crate::conf::EngineConfig;
use crate::cursor::CursorStore;
use crate::dispatch::NotificationSink;
use crate::metrics::EngineMetrics;

use super::registry::SourceRegistry;

pub struct EngineState {
    pub registry: SourceRegistry,
    pub cursors: CursorStore,
    pub classifier: Classifier,
    pub metrics: Arc<EngineMetrics>,
    pub config: EngineConfig,
    pub source: Arc<dyn LineSource>,
    pub sink: Arc<dyn NotificationSink>,
}

impl EngineState {
    pub fn new(
        config: EngineConfig,
        source: Arc<dyn LineSource>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            registry: SourceRegistry::new(),
            cursors: CursorStore::new(),
            classifier: Classifier::new(),
            metrics: Arc::new(EngineMetrics::new()),
            config,
            source,
            sink,
        }
    }

    /// Register a source for tailing. Idempotent; returns `false` when the
    /// key is already registered.
    pub fn register_source(&self, key: &str, path: &str) -> bool {
        let registered = self.registry.register(key, path);
        if registered {
            tracing::info!(source = key, path, "source registered");
        }
        registered
    }

    /// Deregister a source and discard its cursor. An in-flight cycle
    /// finishes, but no new cycle starts for this key.
    pub fn deregister_source(&self, key: &str) -> bool {
        let removed = self.registry.deregister(key);
        if removed {
            self.cursors.forget(key);
            tracing::info!(source = key, "source deregistered");
        }
        removed
    }
}

pub type SharedState = Arc<EngineState>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeLineSource;
    use crate::dispatch::fake::RecordingSink;

    fn state() -> EngineState {
        EngineState::new(
            EngineConfig::default(),
            Arc::new(FakeLineSource::new()),
            Arc::new(RecordingSink::new()),
        )
    }

    #[test]
    fn register_and_deregister_round() {
        let state = state();
        assert!(state.register_source("emerald-eu", "/logs/a.log"));
        assert!(!state.register_source("emerald-eu", "/logs/a.log"));
        assert!(state.deregister_source("emerald-eu"));
        assert!(!state.deregister_source("emerald-eu"));
    }

    #[test]
    fn deregister_discards_cursor() {
        let state = state();
        state.register_source("emerald-eu", "/logs/a.log");
        state.cursors.advance("emerald-eu", 42);
        assert_eq!(state.cursors.current("emerald-eu"), 42);

        state.deregister_source("emerald-eu");
        assert_eq!(state.cursors.current("emerald-eu"), 0);
    }
}
