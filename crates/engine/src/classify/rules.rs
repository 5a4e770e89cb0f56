//! Ordered rule table — first match wins.
//!
//! Precedence lives in an explicit ordered table of (pattern, extractor)
//! rules iterated once per line, so the ordering contract is data, not
//! control flow. Rule order is a correctness property: some patterns are
//! textual substrings of others, and any new pattern must be inserted
//! before broader patterns that could shadow it.

use std::sync::Arc;

use regex::{Captures, Regex};

use super::event::{ClassifiedEvent, EventKind, Field};
use super::timestamp;
use crate::mission;

type Extractor = fn(&Captures<'_>) -> EventKind;

struct Rule {
    pattern: Regex,
    extract: Extractor,
}

fn rule(pattern: &str, extract: Extractor) -> Rule {
    Rule {
        pattern: Regex::new(pattern).expect("static classifier pattern must compile"),
        extract,
    }
}

/// Classifies raw log lines into typed events via the ordered rule table.
///
/// A line matching zero rules produces no event and is silently skipped;
/// unmatched lines are expected and high-frequency.
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            rules: vec![
                // Current player patterns. The timeout pattern must stay
                // ahead of the queue pattern family: both are LogNet
                // warnings and a future broadening of either could shadow
                // the other.
                rule(
                    r"LogOnline: Warning: Player \|(.+?) successfully registered!",
                    extract_join,
                ),
                rule(
                    r"LogOnline: Warning: Player \|(.+?) successfully unregistered from the session.",
                    extract_leave,
                ),
                rule(
                    r"LogNet: Warning: UNetConnection::Tick: Connection TIMED OUT.+UniqueId: EOS:\|(.+?)($|,)",
                    extract_timeout,
                ),
                rule(
                    r"LogNet: Warning: Player (.+?) joined the queue",
                    extract_queued,
                ),
                // Legacy join/leave kept for older log formats; they map to
                // the same join/leave kinds.
                rule(r"LogSFPS: \[Login\] Player (.+?) connected", extract_join),
                rule(r"LogSFPS: \[Logout\] Player (.+?) disconnected", extract_leave),
                // Combat and world events.
                rule(
                    r"LogSFPS: \[Kill\] (.+?) killed (.+?) with (.+?) at distance (\S+)",
                    extract_kill,
                ),
                rule(r"LogSFPS: \[Death\] (.+?) died from (.+)", extract_death),
                rule(r"LogSFPS: AirDrop switched to (\w+)", extract_airdrop),
                rule(
                    r"LogSFPS: Helicopter crash spawned at position (.+)",
                    extract_heli_crash,
                ),
                rule(r"LogSFPS: Trader event started at (.+)", extract_trader),
                rule(r"LogSFPS: Mission (.+?) switched to (\w+)", extract_mission),
                rule(
                    r"LogSFPS: Convoy (.+?) (started|spawned|arrived)",
                    extract_convoy,
                ),
                rule(
                    r"LogSFPS: WanderingTrader (spawned|arrived) at (.+)",
                    extract_wandering_trader,
                ),
                rule(
                    r"LogSFPS: DynamicEvent (.+?) (started|ended|activated)",
                    extract_dynamic,
                ),
            ],
        }
    }

    /// Classify one raw line; the first matching rule wins and evaluation
    /// stops. The optional timestamp prefix is attached regardless of
    /// which rule matched.
    pub fn classify(&self, source_key: &Arc<str>, line: &str) -> Option<ClassifiedEvent> {
        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(line) {
                return Some(ClassifiedEvent {
                    source_key: Arc::clone(source_key),
                    timestamp: timestamp::extract(line).map(str::to_owned),
                    kind: (rule.extract)(&caps),
                });
            }
        }
        None
    }
}

fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index).map_or("", |m| m.as_str()).trim().to_string()
}

fn extract_join(caps: &Captures<'_>) -> EventKind {
    EventKind::PlayerJoin {
        player: group(caps, 1),
    }
}

fn extract_leave(caps: &Captures<'_>) -> EventKind {
    EventKind::PlayerLeave {
        player: group(caps, 1),
    }
}

fn extract_timeout(caps: &Captures<'_>) -> EventKind {
    EventKind::PlayerTimeout {
        player: group(caps, 1),
    }
}

fn extract_queued(caps: &Captures<'_>) -> EventKind {
    EventKind::PlayerQueued {
        player: group(caps, 1),
    }
}

fn extract_kill(caps: &Captures<'_>) -> EventKind {
    EventKind::PlayerKilled {
        killer: group(caps, 1),
        victim: group(caps, 2),
        weapon: group(caps, 3),
        distance: Field::parse(&group(caps, 4)),
    }
}

fn extract_death(caps: &Captures<'_>) -> EventKind {
    EventKind::PlayerDied {
        player: group(caps, 1),
        cause: group(caps, 2),
    }
}

fn extract_airdrop(caps: &Captures<'_>) -> EventKind {
    EventKind::AirdropStateChanged {
        state: Field::parse(&group(caps, 1)),
    }
}

fn extract_heli_crash(caps: &Captures<'_>) -> EventKind {
    EventKind::HelicopterCrash {
        position: group(caps, 1),
    }
}

fn extract_trader(caps: &Captures<'_>) -> EventKind {
    EventKind::TraderEvent {
        position: group(caps, 1),
    }
}

fn extract_mission(caps: &Captures<'_>) -> EventKind {
    let mission_id = group(caps, 1);
    let descriptor = mission::resolve(&mission_id);
    EventKind::MissionStateChanged {
        mission_id,
        state: Field::parse(&group(caps, 2)),
        tier: descriptor.tier,
        location: descriptor.location,
    }
}

fn extract_convoy(caps: &Captures<'_>) -> EventKind {
    EventKind::ConvoyEvent {
        convoy_id: group(caps, 1),
        phase: Field::parse(&group(caps, 2)),
    }
}

fn extract_wandering_trader(caps: &Captures<'_>) -> EventKind {
    EventKind::WanderingTraderEvent {
        phase: Field::parse(&group(caps, 1)),
        location: group(caps, 2),
    }
}

fn extract_dynamic(caps: &Captures<'_>) -> EventKind {
    EventKind::DynamicEvent {
        event_id: group(caps, 1),
        phase: Field::parse(&group(caps, 2)),
    }
}
