//! Event model — typed domain events extracted from raw log lines.

use std::str::FromStr;
use std::sync::Arc;

/// An extracted field that must parse into a richer type.
///
/// A parse failure keeps the raw token instead of dropping the whole
/// event: partial information is still useful to the sink, so a kill line
/// with a garbled distance stays a kill with the distance flagged invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Valid(T),
    Invalid(String),
}

impl<T: FromStr> Field<T> {
    /// Parse a trimmed raw capture.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse() {
            Ok(value) => Field::Valid(value),
            Err(_) => Field::Invalid(trimmed.to_string()),
        }
    }
}

impl<T> Field<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Field::Valid(_))
    }

    pub fn valid(&self) -> Option<&T> {
        match self {
            Field::Valid(value) => Some(value),
            Field::Invalid(_) => None,
        }
    }
}

/// Airdrop lifecycle states observed in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirdropState {
    Flying,
    Dropping,
    Waiting,
}

impl FromStr for AirdropState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flying" => Ok(AirdropState::Flying),
            "dropping" => Ok(AirdropState::Dropping),
            "waiting" => Ok(AirdropState::Waiting),
            _ => Err(()),
        }
    }
}

/// Mission lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionState {
    Initial,
    Ready,
    Waiting,
    Active,
    Completed,
}

impl FromStr for MissionState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "initial" => Ok(MissionState::Initial),
            "ready" => Ok(MissionState::Ready),
            "waiting" => Ok(MissionState::Waiting),
            "active" => Ok(MissionState::Active),
            "completed" => Ok(MissionState::Completed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvoyPhase {
    Started,
    Spawned,
    Arrived,
}

impl FromStr for ConvoyPhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "started" => Ok(ConvoyPhase::Started),
            "spawned" => Ok(ConvoyPhase::Spawned),
            "arrived" => Ok(ConvoyPhase::Arrived),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WanderingPhase {
    Spawned,
    Arrived,
}

impl FromStr for WanderingPhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spawned" => Ok(WanderingPhase::Spawned),
            "arrived" => Ok(WanderingPhase::Arrived),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicPhase {
    Started,
    Ended,
    Activated,
}

impl FromStr for DynamicPhase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "started" => Ok(DynamicPhase::Started),
            "ended" => Ok(DynamicPhase::Ended),
            "activated" => Ok(DynamicPhase::Activated),
            _ => Err(()),
        }
    }
}

/// The event families and their extracted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    PlayerJoin {
        player: String,
    },
    PlayerLeave {
        player: String,
    },
    PlayerTimeout {
        player: String,
    },
    PlayerQueued {
        player: String,
    },
    PlayerKilled {
        killer: String,
        victim: String,
        weapon: String,
        distance: Field<u32>,
    },
    PlayerDied {
        player: String,
        cause: String,
    },
    AirdropStateChanged {
        state: Field<AirdropState>,
    },
    HelicopterCrash {
        position: String,
    },
    TraderEvent {
        position: String,
    },
    MissionStateChanged {
        mission_id: String,
        state: Field<MissionState>,
        tier: u32,
        location: String,
    },
    ConvoyEvent {
        convoy_id: String,
        phase: Field<ConvoyPhase>,
    },
    WanderingTraderEvent {
        phase: Field<WanderingPhase>,
        location: String,
    },
    DynamicEvent {
        event_id: String,
        phase: Field<DynamicPhase>,
    },
}

impl EventKind {
    /// Stable name for logging and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::PlayerJoin { .. } => "player_join",
            EventKind::PlayerLeave { .. } => "player_leave",
            EventKind::PlayerTimeout { .. } => "player_timeout",
            EventKind::PlayerQueued { .. } => "player_queued",
            EventKind::PlayerKilled { .. } => "player_killed",
            EventKind::PlayerDied { .. } => "player_died",
            EventKind::AirdropStateChanged { .. } => "airdrop_state_changed",
            EventKind::HelicopterCrash { .. } => "helicopter_crash",
            EventKind::TraderEvent { .. } => "trader_event",
            EventKind::MissionStateChanged { .. } => "mission_state_changed",
            EventKind::ConvoyEvent { .. } => "convoy_event",
            EventKind::WanderingTraderEvent { .. } => "wandering_trader_event",
            EventKind::DynamicEvent { .. } => "dynamic_event",
        }
    }
}

/// A typed domain event attributable to exactly one raw log line.
///
/// Immutable once produced. The timestamp is the raw bracketed token from
/// the line prefix when present; consumers treat its absence as "use the
/// time of processing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEvent {
    /// Owning source key; `Arc<str>` so per-cycle clones stay cheap.
    pub source_key: Arc<str>,
    pub timestamp: Option<String>,
    pub kind: EventKind,
}
