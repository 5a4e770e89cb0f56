//! Mission module — mission identifier decoding and reportability policy.

pub mod resolver;

pub use resolver::{resolve, MissionDescriptor, REPORTABLE_TIER};
