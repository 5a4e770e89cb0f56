//! Job module — the periodic poll scheduler and per-source cycle.

pub mod cycle;
pub mod poll;

pub use cycle::run_cycle;
pub use poll::{poll_once, run_poll_loop};
