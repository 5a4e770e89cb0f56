//! Source registry — the set of log sources currently being tailed.
//!
//! Registration and deregistration are idempotent. Deregistering a source
//! stops new cycles from starting for it; a cycle already in flight holds
//! its own `Arc<SourceEntry>` and finishes undisturbed.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

/// One registered log source.
pub struct SourceEntry {
    pub key: Arc<str>,
    pub path: String,
    /// At-most-one-in-flight guard; the scheduler takes it with
    /// `try_lock` and skips the cycle when the previous one still runs.
    pub in_flight: Mutex<()>,
}

impl SourceEntry {
    fn new(key: &str, path: &str) -> Arc<Self> {
        Arc::new(Self {
            key: Arc::from(key),
            path: path.to_string(),
            in_flight: Mutex::new(()),
        })
    }
}

#[derive(Default)]
pub struct SourceRegistry {
    sources: DashMap<String, Arc<SourceEntry>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source. Returns `false` if the key was already
    /// registered; the existing entry (and its in-flight guard) is kept.
    pub fn register(&self, key: &str, path: &str) -> bool {
        match self.sources.entry(key.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => false,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(SourceEntry::new(key, path));
                true
            }
        }
    }

    /// Deregister a source. Returns `false` if the key was unknown.
    pub fn deregister(&self, key: &str) -> bool {
        self.sources.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sources.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Stable view of the current entries for one scheduler tick.
    /// Entries removed after the snapshot still finish their cycle.
    pub fn snapshot(&self) -> Vec<Arc<SourceEntry>> {
        self.sources
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}
