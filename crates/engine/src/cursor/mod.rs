//! Cursor module — per-source read-cursor tracking.

pub mod store;

pub use store::CursorStore;
