//! Sink trait — abstract interface for notification delivery.
//!
//! The engine never talks to a chat platform or webhook directly; it
//! hands finished notifications to this trait. `TracingSink` is the
//! built-in implementation, `fake.rs` provides a recording test double.

use std::pin::Pin;
use std::sync::Arc;

use crate::classify::ClassifiedEvent;

/// Direction of a player-flow summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerFlow {
    Joined,
    Left,
}

impl PlayerFlow {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerFlow::Joined => "joined",
            PlayerFlow::Left => "left",
        }
    }
}

/// One folded join/leave summary for a noisy cycle.
///
/// `names` is already capped at the display limit; `overflow` counts the
/// names that did not fit ("and N more").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryNotification {
    pub source_key: Arc<str>,
    pub flow: PlayerFlow,
    pub names: Vec<String>,
    pub overflow: usize,
}

/// What the engine delivers: a single event or a per-cycle summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Event(ClassifiedEvent),
    Summary(SummaryNotification),
}

impl Notification {
    /// Owning source key, regardless of variant.
    pub fn source_key(&self) -> &Arc<str> {
        match self {
            Notification::Event(event) => &event.source_key,
            Notification::Summary(summary) => &summary.source_key,
        }
    }
}

/// Delivery interface for finished notifications.
///
/// Object-safe thanks to the `Pin<Box<…>>` return. Implementations must
/// be `Send + Sync` so they can live inside the shared engine state.
/// Delivery outcome is the implementation's concern; the engine does not
/// retry and does not roll back cursors on sink failure.
pub trait NotificationSink: Send + Sync {
    fn deliver(
        &self,
        notification: Notification,
    ) -> Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>>;
}

/// Built-in sink that emits notifications as structured log records.
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn deliver(
        &self,
        notification: Notification,
    ) -> Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            match notification {
                Notification::Event(event) => {
                    tracing::info!(
                        source = %event.source_key,
                        kind = event.kind.name(),
                        timestamp = event.timestamp.as_deref(),
                        payload = ?event.kind,
                        "event"
                    );
                }
                Notification::Summary(summary) => {
                    tracing::info!(
                        source = %summary.source_key,
                        flow = summary.flow.as_str(),
                        names = ?summary.names,
                        overflow = summary.overflow,
                        "player flow summary"
                    );
                }
            }
        })
    }
}
