//! Client module — the line-source seam between the engine and transports.
//!
//! Every poll cycle reaches its log file through the [`LineSource`] trait.
//! `local.rs` provides a filesystem-backed implementation.
//! `fake.rs` provides a scriptable test double.

pub mod fake;
pub mod local;
pub mod source;

pub use fake::FakeLineSource;
pub use local::LocalLineSource;
pub use source::{FetchBatch, FetchError, LineSource};
