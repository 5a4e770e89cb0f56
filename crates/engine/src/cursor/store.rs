//! Keyed cursor store with per-key write serialization.
//!
//! The scheduler already guarantees at most one in-flight cycle per
//! source, and the DashMap shard locks serialize writes per key on top of
//! that, so a future scheduler change cannot introduce cursor races.

use dashmap::DashMap;

/// Tracks the last successfully processed position per log source.
///
/// Cursors live only as long as the process; persistence across restarts
/// is the registry collaborator's concern. `advance` is the only forward
/// mutator, `reset` exists solely for rotation handling, and `forget`
/// discards state on deregistration.
#[derive(Debug, Default)]
pub struct CursorStore {
    cursors: DashMap<String, u64>,
}

impl CursorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last committed cursor, or zero for a source never seen before.
    pub fn current(&self, source_key: &str) -> u64 {
        self.cursors.get(source_key).map(|c| *c).unwrap_or(0)
    }

    /// Commit a new cursor after a successful processing pass.
    pub fn advance(&self, source_key: &str, new_cursor: u64) {
        self.cursors.insert(source_key.to_string(), new_cursor);
    }

    /// Rotation detected by the caller: start over from the beginning.
    pub fn reset(&self, source_key: &str) {
        self.cursors.insert(source_key.to_string(), 0);
    }

    /// Drop all state for a deregistered source.
    pub fn forget(&self, source_key: &str) {
        self.cursors.remove(source_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn unseen_source_starts_at_zero() {
        let store = CursorStore::new();
        assert_eq!(store.current("emerald-eu"), 0);
    }

    #[test]
    fn advance_commits_new_cursor() {
        let store = CursorStore::new();
        store.advance("emerald-eu", 120);
        assert_eq!(store.current("emerald-eu"), 120);

        store.advance("emerald-eu", 150);
        assert_eq!(store.current("emerald-eu"), 150);
    }

    #[test]
    fn reset_returns_to_zero() {
        let store = CursorStore::new();
        store.advance("emerald-eu", 500);
        store.reset("emerald-eu");
        assert_eq!(store.current("emerald-eu"), 0);
    }

    #[test]
    fn forget_discards_state() {
        let store = CursorStore::new();
        store.advance("emerald-eu", 42);
        store.forget("emerald-eu");
        assert_eq!(store.current("emerald-eu"), 0);
    }

    #[test]
    fn sources_are_independent() {
        let store = CursorStore::new();
        store.advance("a", 10);
        store.advance("b", 20);
        store.reset("a");

        assert_eq!(store.current("a"), 0);
        assert_eq!(store.current("b"), 20);
    }

    #[test]
    fn concurrent_advances_on_distinct_keys() {
        let store = Arc::new(CursorStore::new());
        let mut handles = Vec::new();

        for i in 0..8u64 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                let key = format!("server-{i}");
                for cursor in 1..=100 {
                    store.advance(&key, cursor);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..8u64 {
            assert_eq!(store.current(&format!("server-{i}")), 100);
        }
    }
}
