//! Local filesystem line source.
//!
//! Reads log files from the local disk with a line-count cursor. Remote
//! transports (SFTP and friends) plug in behind the same [`LineSource`]
//! trait; this implementation is the default and doubles as the reference
//! for the truncation contract.

use std::io::ErrorKind;
use std::pin::Pin;

use super::source::{FetchBatch, FetchError, LineSource};

/// Filesystem-backed [`LineSource`].
///
/// Truncation is detected by the file now holding fewer lines than the
/// committed cursor; the caller resets the cursor and re-reads from zero
/// on its next cycle. A final line without a trailing newline is counted
/// as a line; acceptable for append-only logs where partial writes are
/// completed before the next poll.
#[derive(Debug, Default)]
pub struct LocalLineSource;

impl LocalLineSource {
    pub fn new() -> Self {
        Self
    }
}

impl LineSource for LocalLineSource {
    fn fetch_since<'a>(
        &'a self,
        path: &'a str,
        cursor: u64,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<FetchBatch, FetchError>> + Send + 'a>>
    {
        Box::pin(async move {
            let content = match tokio::fs::read_to_string(path).await {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => return Err(FetchError::NotFound),
                Err(e) => return Err(FetchError::Transient(e.to_string())),
            };

            let total = content.lines().count() as u64;
            if total < cursor {
                return Err(FetchError::Truncated);
            }

            let lines = content
                .lines()
                .skip(cursor as usize)
                .map(str::to_owned)
                .collect();

            Ok(FetchBatch {
                lines,
                new_cursor: total,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn fetch_from_zero_returns_all_lines() {
        let file = write_file(&["one", "two", "three"]);
        let source = LocalLineSource::new();

        let batch = source
            .fetch_since(file.path().to_str().unwrap(), 0)
            .await
            .unwrap();

        assert_eq!(batch.lines, vec!["one", "two", "three"]);
        assert_eq!(batch.new_cursor, 3);
    }

    #[tokio::test]
    async fn fetch_from_cursor_skips_processed_lines() {
        let file = write_file(&["one", "two", "three"]);
        let source = LocalLineSource::new();

        let batch = source
            .fetch_since(file.path().to_str().unwrap(), 2)
            .await
            .unwrap();

        assert_eq!(batch.lines, vec!["three"]);
        assert_eq!(batch.new_cursor, 3);
    }

    #[tokio::test]
    async fn fetch_at_end_is_empty_and_idempotent() {
        let file = write_file(&["one", "two"]);
        let source = LocalLineSource::new();
        let path = file.path().to_str().unwrap().to_string();

        let first = source.fetch_since(&path, 2).await.unwrap();
        let second = source.fetch_since(&path, 2).await.unwrap();

        assert!(first.lines.is_empty());
        assert!(second.lines.is_empty());
        assert_eq!(first.new_cursor, 2);
        assert_eq!(second.new_cursor, 2);
    }

    #[tokio::test]
    async fn fetch_detects_truncation() {
        let file = write_file(&["only"]);
        let source = LocalLineSource::new();

        // Cursor says 5 lines were already processed, but the file has 1:
        // it must have been rotated.
        let result = source.fetch_since(file.path().to_str().unwrap(), 5).await;

        assert_eq!(result, Err(FetchError::Truncated));
    }

    #[tokio::test]
    async fn fetch_missing_file_is_not_found() {
        let source = LocalLineSource::new();
        let result = source.fetch_since("/nonexistent/server.log", 0).await;
        assert_eq!(result, Err(FetchError::NotFound));
    }

    #[tokio::test]
    async fn fetch_after_append_returns_only_new_lines() {
        let mut file = write_file(&["one"]);
        let source = LocalLineSource::new();
        let path = file.path().to_str().unwrap().to_string();

        let first = source.fetch_since(&path, 0).await.unwrap();
        assert_eq!(first.new_cursor, 1);

        writeln!(file, "two").unwrap();
        file.flush().unwrap();

        let second = source.fetch_since(&path, first.new_cursor).await.unwrap();
        assert_eq!(second.lines, vec!["two"]);
        assert_eq!(second.new_cursor, 2);
    }

    #[tokio::test]
    async fn fetch_empty_file() {
        let file = write_file(&[]);
        let source = LocalLineSource::new();

        let batch = source
            .fetch_since(file.path().to_str().unwrap(), 0)
            .await
            .unwrap();

        assert!(batch.lines.is_empty());
        assert_eq!(batch.new_cursor, 0);
    }
}
