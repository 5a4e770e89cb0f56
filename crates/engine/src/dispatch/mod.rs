//! Dispatch module — notification model and per-cycle delivery policy.
//!
//! Classified events become [`Notification`]s handed to a
//! [`NotificationSink`] trait object. Most event kinds go out
//! individually as soon as they are classified; join/leave names are
//! additionally accumulated per cycle and folded into one summary when a
//! cycle is noisy. Delivery is at-least-once and has no feedback into
//! cursor state.

pub mod cycle;
pub mod fake;
pub mod sink;

pub use cycle::CycleDispatcher;
pub use sink::{Notification, NotificationSink, PlayerFlow, SummaryNotification, TracingSink};
