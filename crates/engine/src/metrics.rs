//! Engine counters.
//!
//! All counters use `Ordering::Relaxed`: these are observability metrics,
//! eventual correctness is enough and the hot path (one add per log line)
//! should stay free of synchronization. `snapshot()` reads are atomic per
//! field but not transactional across fields; slight tearing between
//! related counters is acceptable.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Mission tiers tracked individually in the distribution. Tiers outside
/// 1..=TIER_SLOTS are clamped into the nearest slot.
const TIER_SLOTS: usize = 5;

/// Per-line and per-cycle counters for one engine instance.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    /// Raw lines pulled from sources, matched or not.
    lines_processed: AtomicU64,
    /// Lines that matched a classification rule.
    events_classified: AtomicU64,
    /// Lines that matched no rule.
    unknown_lines: AtomicU64,
    /// Mission events below the reportable tier, counted but not delivered.
    missions_suppressed: AtomicU64,
    /// Poll cycles that ran to completion.
    cycles_completed: AtomicU64,
    /// Poll cycles abandoned on a fetch failure or timeout.
    cycles_failed: AtomicU64,
    /// Truncation resets observed (file rotated under the cursor).
    rotations_detected: AtomicU64,
    /// Mission events by tier, reportable or not.
    mission_tiers: [AtomicU64; TIER_SLOTS],
}

impl EngineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hottest path, called once per fetched line.
    #[inline]
    pub fn record_line(&self, classified: bool) {
        self.lines_processed.fetch_add(1, Ordering::Relaxed);
        if classified {
            self.events_classified.fetch_add(1, Ordering::Relaxed);
        } else {
            self.unknown_lines.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_mission_tier(&self, tier: u32) {
        let slot = (tier.clamp(1, TIER_SLOTS as u32) - 1) as usize;
        self.mission_tiers[slot].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_mission_suppressed(&self) {
        self.missions_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_cycle(&self) {
        self.cycles_completed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_cycle_failure(&self) {
        self.cycles_failed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rotation(&self) {
        self.rotations_detected.fetch_add(1, Ordering::Relaxed);
    }

    /// Serializable snapshot for logging or export.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut mission_tiers = [0u64; TIER_SLOTS];
        for (slot, counter) in self.mission_tiers.iter().enumerate() {
            mission_tiers[slot] = counter.load(Ordering::Relaxed);
        }
        MetricsSnapshot {
            lines_processed: self.lines_processed.load(Ordering::Relaxed),
            events_classified: self.events_classified.load(Ordering::Relaxed),
            unknown_lines: self.unknown_lines.load(Ordering::Relaxed),
            missions_suppressed: self.missions_suppressed.load(Ordering::Relaxed),
            cycles_completed: self.cycles_completed.load(Ordering::Relaxed),
            cycles_failed: self.cycles_failed.load(Ordering::Relaxed),
            rotations_detected: self.rotations_detected.load(Ordering::Relaxed),
            mission_tiers,
        }
    }
}

/// Read-only view of [`EngineMetrics`], cheap to clone and serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub lines_processed: u64,
    pub events_classified: u64,
    pub unknown_lines: u64,
    pub missions_suppressed: u64,
    pub cycles_completed: u64,
    pub cycles_failed: u64,
    pub rotations_detected: u64,
    /// Index 0 holds tier 1, index 4 holds tier 5 and above.
    pub mission_tiers: [u64; 5],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_recording_splits_by_outcome() {
        let metrics = EngineMetrics::new();
        metrics.record_line(true);
        metrics.record_line(true);
        metrics.record_line(false);

        let snap = metrics.snapshot();
        assert_eq!(snap.lines_processed, 3);
        assert_eq!(snap.events_classified, 2);
        assert_eq!(snap.unknown_lines, 1);
    }

    #[test]
    fn mission_tiers_fill_their_slots() {
        let metrics = EngineMetrics::new();
        metrics.record_mission_tier(1);
        metrics.record_mission_tier(3);
        metrics.record_mission_tier(3);
        metrics.record_mission_tier(5);

        assert_eq!(metrics.snapshot().mission_tiers, [1, 0, 2, 0, 1]);
    }

    #[test]
    fn out_of_range_tiers_clamp() {
        let metrics = EngineMetrics::new();
        metrics.record_mission_tier(0);
        metrics.record_mission_tier(9);

        assert_eq!(metrics.snapshot().mission_tiers, [1, 0, 0, 0, 1]);
    }

    #[test]
    fn cycle_counters_are_independent() {
        let metrics = EngineMetrics::new();
        metrics.record_cycle();
        metrics.record_cycle();
        metrics.record_cycle_failure();
        metrics.record_rotation();

        let snap = metrics.snapshot();
        assert_eq!(snap.cycles_completed, 2);
        assert_eq!(snap.cycles_failed, 1);
        assert_eq!(snap.rotations_detected, 1);
    }

    #[test]
    fn concurrent_line_recording_loses_nothing() {
        let metrics = std::sync::Arc::new(EngineMetrics::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let metrics = std::sync::Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        metrics.record_line(true);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.snapshot().lines_processed, 4000);
    }
}
