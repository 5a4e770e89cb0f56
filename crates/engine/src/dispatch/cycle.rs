//! Per-cycle dispatcher.
//!
//! One `CycleDispatcher` lives for exactly one poll cycle of one source.
//! Events flow through `dispatch` as they are classified; `finish` closes
//! the cycle and emits join/leave summaries for noisy cycles. Mission
//! events pass the tier gate here, every other kind is delivered as-is.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::classify::{ClassifiedEvent, EventKind};
use crate::conf::DispatchConfig;
use crate::metrics::EngineMetrics;

use super::sink::{Notification, NotificationSink, PlayerFlow, SummaryNotification};

pub struct CycleDispatcher<'a> {
    sink: &'a dyn NotificationSink,
    metrics: &'a EngineMetrics,
    policy: &'a DispatchConfig,
    source_key: Arc<str>,
    // BTreeSet: distinct names, and summaries list them in a stable order.
    joined: BTreeSet<String>,
    left: BTreeSet<String>,
}

impl<'a> CycleDispatcher<'a> {
    pub fn new(
        sink: &'a dyn NotificationSink,
        metrics: &'a EngineMetrics,
        policy: &'a DispatchConfig,
        source_key: Arc<str>,
    ) -> Self {
        Self {
            sink,
            metrics,
            policy,
            source_key,
            joined: BTreeSet::new(),
            left: BTreeSet::new(),
        }
    }

    /// Route one classified event.
    ///
    /// Join/leave events are delivered immediately and their names
    /// accumulated for the end-of-cycle summary decision. Mission events
    /// below the reportable tier are counted and dropped. Everything else
    /// is delivered immediately and never batched; state-change events
    /// are latency-sensitive.
    pub async fn dispatch(&mut self, event: ClassifiedEvent) {
        match &event.kind {
            EventKind::PlayerJoin { player } => {
                self.joined.insert(player.clone());
            }
            EventKind::PlayerLeave { player } => {
                self.left.insert(player.clone());
            }
            EventKind::MissionStateChanged { tier, mission_id, .. } => {
                self.metrics.record_mission_tier(*tier);
                if *tier < crate::mission::REPORTABLE_TIER {
                    tracing::debug!(
                        source = %self.source_key,
                        mission = %mission_id,
                        tier,
                        "mission below reportable tier, suppressed"
                    );
                    self.metrics.record_mission_suppressed();
                    return;
                }
            }
            _ => {}
        }
        self.sink.deliver(Notification::Event(event)).await;
    }

    /// Close the cycle: emit one summary per flow direction whose distinct
    /// name count exceeded the threshold.
    pub async fn finish(self) {
        let Self {
            sink,
            policy,
            source_key,
            joined,
            left,
            ..
        } = self;
        Self::summarize(sink, policy, &source_key, PlayerFlow::Joined, joined).await;
        Self::summarize(sink, policy, &source_key, PlayerFlow::Left, left).await;
    }

    async fn summarize(
        sink: &dyn NotificationSink,
        policy: &DispatchConfig,
        source_key: &Arc<str>,
        flow: PlayerFlow,
        names: BTreeSet<String>,
    ) {
        if names.len() <= policy.summary_threshold {
            return;
        }
        let total = names.len();
        let listed: Vec<String> = names.into_iter().take(policy.summary_display_cap).collect();
        let overflow = total - listed.len();
        sink.deliver(Notification::Summary(SummaryNotification {
            source_key: Arc::clone(source_key),
            flow,
            names: listed,
            overflow,
        }))
        .await;
    }
}
