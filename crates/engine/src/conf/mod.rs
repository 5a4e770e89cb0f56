//! Conf module — configuration model and file/env loading.

pub mod load;
pub mod model;

pub use model::{DispatchConfig, EngineConfig, SourceConfig};
