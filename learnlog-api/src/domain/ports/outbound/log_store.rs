//! Log store port (outbound).

use async_trait::async_trait;

use crate::domain::{
    models::{LogEntry, LogId, NewLogEntry, UserId},
    LogError,
};

/// Persistence of learning log entries.
#[async_trait]
pub trait LogStore: Send + Sync + 'static {
    /// Insert an entry owned by `user_id` and return it as stored.
    async fn insert_log(&self, user_id: &UserId, entry: &NewLogEntry)
        -> Result<LogEntry, LogError>;

    /// All entries of `user_id`, newest first.
    async fn list_logs(&self, user_id: &UserId) -> Result<Vec<LogEntry>, LogError>;

    /// Number of entries of `user_id` visible to the caller.
    async fn log_count(&self, user_id: &UserId) -> Result<u64, LogError>;

    /// Shared entries written by any of `authors`, newest first, with the
    /// author's profile attached.
    async fn list_shared_logs(&self, authors: &[UserId]) -> Result<Vec<LogEntry>, LogError>;

    /// Delete `log_id` if it is owned by `user_id`. Returns whether a row
    /// was removed.
    async fn delete_log(&self, user_id: &UserId, log_id: &LogId) -> Result<bool, LogError>;
}
