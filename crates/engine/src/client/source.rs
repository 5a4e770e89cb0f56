//! LineSource trait — abstract interface for fetching new log lines.

use std::pin::Pin;

use thiserror::Error;

/// New lines appended after a cursor, plus the advanced cursor.
///
/// The cursor is opaque to the engine; for the bundled implementations it
/// is a line count. A fetch at the current end of file yields an empty
/// `lines` vector with `new_cursor` equal to the requested cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchBatch {
    pub lines: Vec<String>,
    pub new_cursor: u64,
}

/// Distinguishable fetch failures.
///
/// The poll cycle reacts to each kind differently: `NotFound` and
/// `Transient` are retried on the next cycle with no state change, while
/// `Truncated` means the file was rotated and the cursor must be reset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("log file not found")]
    NotFound,
    #[error("file shrank below the committed cursor (rotation)")]
    Truncated,
    #[error("transient fetch failure: {0}")]
    Transient(String),
}

/// Unified async interface over a log-line transport.
///
/// Object-safe thanks to `Pin<Box<…>>` returns. Implementations must be
/// `Send + Sync` so they can live inside `Arc<EngineState>`. The caller
/// owns the fetch timeout; implementations are free to block on I/O.
pub trait LineSource: Send + Sync {
    /// Fetch the ordered sequence of lines appended after `cursor`.
    fn fetch_since<'a>(
        &'a self,
        path: &'a str,
        cursor: u64,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<FetchBatch, FetchError>> + Send + 'a>>;
}
