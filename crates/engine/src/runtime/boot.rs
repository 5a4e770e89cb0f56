//! Boot — logging init, config load, state creation.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::LocalLineSource;
use crate::conf::EngineConfig;
use crate::dispatch::TracingSink;
use crate::state::{EngineState, SharedState};

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load and validate config, build shared state, and register the
/// configured sources.
pub fn boot() -> Result<SharedState, Box<dyn std::error::Error>> {
    let config = EngineConfig::load()?;
    config.validate()?;
    info!(
        poll_interval_secs = config.poll_interval_secs,
        sources = config.sources.len(),
        "configuration loaded"
    );

    let sources = config.sources.clone();
    let state = Arc::new(EngineState::new(
        config,
        Arc::new(LocalLineSource::new()),
        Arc::new(TracingSink),
    ));
    for source in &sources {
        state.register_source(&source.key, &source.path);
    }

    Ok(state)
}
