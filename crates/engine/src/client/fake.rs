//! Fake — test double for the line-source transport.
//!
//! Provides a deterministic [`FakeLineSource`] that implements
//! [`LineSource`] over in-memory per-path state. Useful for unit-testing
//! the poll cycle and for integration tests without touching a filesystem
//! or a remote server.

use std::collections::VecDeque;
use std::pin::Pin;

use dashmap::DashMap;

use super::source::{FetchBatch, FetchError, LineSource};

/// A fake line source for deterministic testing.
///
/// Each path holds a vector of lines standing in for the current file
/// content, plus an optional queue of forced failures. A queued failure is
/// consumed by exactly one fetch, so tests can script "fail once, then
/// recover" sequences. Truncation falls out naturally from replacing a
/// path's content with fewer lines.
#[derive(Default)]
pub struct FakeLineSource {
    files: DashMap<String, Vec<String>>,
    failures: DashMap<String, VecDeque<FetchError>>,
}

impl FakeLineSource {
    /// Create an empty fake source; every path starts as not-found.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full content of a fake file.
    pub fn set_lines(&self, path: &str, lines: &[&str]) {
        self.files
            .insert(path.to_string(), lines.iter().map(|s| s.to_string()).collect());
    }

    /// Append a single line to a fake file, creating it if needed.
    pub fn append_line(&self, path: &str, line: &str) {
        self.files
            .entry(path.to_string())
            .or_default()
            .push(line.to_string());
    }

    /// Remove a fake file entirely; subsequent fetches see `NotFound`.
    pub fn remove(&self, path: &str) {
        self.files.remove(path);
    }

    /// Queue a failure to be returned by the next fetch against `path`.
    pub fn push_failure(&self, path: &str, error: FetchError) {
        self.failures
            .entry(path.to_string())
            .or_default()
            .push_back(error);
    }
}

impl LineSource for FakeLineSource {
    fn fetch_since<'a>(
        &'a self,
        path: &'a str,
        cursor: u64,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<FetchBatch, FetchError>> + Send + 'a>>
    {
        Box::pin(async move {
            if let Some(mut queue) = self.failures.get_mut(path) {
                if let Some(error) = queue.pop_front() {
                    return Err(error);
                }
            }

            let Some(lines) = self.files.get(path) else {
                return Err(FetchError::NotFound);
            };

            let total = lines.len() as u64;
            if total < cursor {
                return Err(FetchError::Truncated);
            }

            Ok(FetchBatch {
                lines: lines[cursor as usize..].to_vec(),
                new_cursor: total,
            })
        })
    }
}
