//! Classify module — line-by-line event classification.
//!
//! A raw log line goes through an explicit ordered rule table; the first
//! matching rule produces a [`ClassifiedEvent`], non-matching lines are
//! silently skipped. An optional bracketed timestamp prefix is extracted
//! independently of which rule matches.

pub mod event;
pub mod rules;
pub mod timestamp;

pub use event::{
    AirdropState, ClassifiedEvent, ConvoyPhase, DynamicPhase, EventKind, Field, MissionState,
    WanderingPhase,
};
pub use rules::Classifier;
