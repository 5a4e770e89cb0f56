//! State module — source registry and shared engine state.

pub mod engine;
pub mod registry;

pub use engine::{EngineState, SharedState};
pub use registry::{SourceEntry, SourceRegistry};
