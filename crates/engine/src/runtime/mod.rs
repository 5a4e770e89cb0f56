//! Runtime module — process boot and run loop.

pub mod boot;
pub mod run;
