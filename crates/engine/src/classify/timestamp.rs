//! Timestamp prefix extraction.
//!
//! Log lines optionally start with a bracketed timestamp and a frame
//! counter, e.g. `[2025.05.10-14.22.33:123][  45]LogSFPS: ...`. The token
//! is extracted independently of which classification rule matches; its
//! absence is not an error.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S:%3f";

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[(\d{4}\.\d{2}\.\d{2}-\d{2}\.\d{2}\.\d{2}:\d{3})\]\[\s*\d+\]")
            .expect("static timestamp pattern must compile")
    })
}

/// Extract the raw timestamp token from a line, if present.
pub fn extract(line: &str) -> Option<&str> {
    timestamp_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse a raw token produced by [`extract`] into a naive timestamp.
/// The token carries no zone; it is in the game server's local time.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok()
}
