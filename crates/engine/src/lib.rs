// Domain-driven module structure for the log tailing engine.

// Core infrastructure
pub mod client;
pub mod cursor;
pub mod metrics;
pub mod state;

// Domain modules
pub mod classify;
pub mod conf;
pub mod dispatch;
pub mod job;
pub mod mission;
pub mod runtime;
