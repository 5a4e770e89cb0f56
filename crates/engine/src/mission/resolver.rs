//! Mission descriptor resolver.
//!
//! Mission identifiers are informally structured, underscore-delimited
//! tokens that encode a difficulty tier and a location hint with no fixed
//! grammar (`GA_Military_03_Mis`, `GA_Settle_05_Mis`, ...). The upstream
//! game does not document the convention and it is expected to drift, so
//! every parse failure degrades to a default instead of erroring.
//!
//! The tie-break among multiple numeric tokens is last-match-wins. That is
//! inherited observed behavior, not a chosen design; do not generalize it.

/// Minimum tier that reaches the notification sink. Lower tiers are still
/// counted in metrics but suppressed from dispatch.
pub const REPORTABLE_TIER: u32 = 3;

/// Decoded tier and human-readable location label for one mission id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionDescriptor {
    pub tier: u32,
    pub location: String,
}

impl MissionDescriptor {
    /// Reportability policy: only tier 3 and above go out to the sink.
    pub fn reportable(&self) -> bool {
        self.tier >= REPORTABLE_TIER
    }
}

/// Decode a mission identifier into tier and location.
///
/// An identifier without `_` resolves to tier 1 at "Unknown". Otherwise
/// the tier comes from the digit-like tokens (last one wins) and the
/// location from the second token through a fixed lookup table, falling
/// back to the token with its first letter capitalized.
pub fn resolve(mission_id: &str) -> MissionDescriptor {
    if !mission_id.contains('_') {
        return MissionDescriptor {
            tier: 1,
            location: "Unknown".to_string(),
        };
    }

    let tokens: Vec<&str> = mission_id.split('_').collect();

    let mut tier = 1;
    for token in &tokens {
        if let Some(value) = tier_token_value(token) {
            tier = value;
        }
    }

    let location = if tokens.len() >= 2 {
        location_label(tokens[1], mission_id)
    } else {
        "Unknown".to_string()
    };

    MissionDescriptor { tier, location }
}

/// A token is tier-eligible when it is purely digits, or exactly two
/// characters starting with `0` (zero-padded tiers like "03"). An eligible
/// token that still fails to parse has its non-digit characters stripped;
/// if nothing parseable remains the previous tier stands.
fn tier_token_value(token: &str) -> Option<u32> {
    let all_digits = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
    let zero_pair = token.len() == 2 && token.starts_with('0');
    if !all_digits && !zero_pair {
        return None;
    }

    if let Ok(value) = token.parse::<u32>() {
        return Some(value);
    }

    if token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
        if !digits.is_empty() {
            return digits.parse().ok();
        }
    }

    None
}

/// Fixed lookup of known location codes (case-insensitive) to labels.
/// "Settle" is ambiguous on its own and is disambiguated by substrings of
/// the full identifier.
fn location_label(code: &str, mission_id: &str) -> String {
    let label = match code.to_ascii_lowercase().as_str() {
        "settle" => {
            if mission_id.contains("ChernyLog") {
                "Cherny Log Settlement"
            } else if mission_id.contains("05") {
                "Northern Settlement"
            } else if mission_id.contains("09") {
                "Eastern Settlement"
            } else {
                "Settlement"
            }
        }
        "military" => "Military Base",
        "sawmill" => "Sawmill",
        "lighthouse" => "Lighthouse",
        "bunker" => "Bunker",
        "ind" => "Industrial Zone",
        "khimmash" => "Chemical Plant",
        "promzone" => "Industrial Complex",
        "kamensk" => "Kamensk",
        "elevator" => "Grain Elevator",
        "bochki" => "Bochki Storage",
        "vostok" => "Vostok",
        "beregovoy" => "Beregovoy",
        "krasnoe" => "Krasnoe",
        "dubovoe" => "Dubovoe",
        "airport" => "Airfield",
        "" => "Unknown",
        _ => return capitalize(code),
    };
    label.to_string()
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
