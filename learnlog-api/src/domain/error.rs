use thiserror::Error;

use super::models::LogId;

/// Errors that can occur while computing a streak.
///
/// An empty activity history is not an error; it is reported as a streak
/// with status `NoActivity`.
#[derive(Debug, Error)]
pub enum StreakError {
    #[error("failed to read activity: {0}")]
    ActivityRead(String),
    #[error("malformed timestamp {value:?} on log {log_id}")]
    MalformedTimestamp { log_id: LogId, value: String },
}

/// Errors from the identity provider itself, as opposed to a rejected token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum LogError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("invalid log entry: {0}")]
    Invalid(String),
    #[error("log not found: {0}")]
    NotFound(LogId),
    #[error("{0}")]
    Store(String),
}

impl LogError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("you cannot follow yourself")]
    CannotFollowSelf,
    #[error("invalid comment: {0}")]
    InvalidComment(String),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("comment not found: {0}")]
    CommentNotFound(String),
    #[error("{0}")]
    Store(String),
}

impl SocialError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

impl From<LogError> for SocialError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::NotAuthenticated => Self::NotAuthenticated,
            other => Self::store(other.to_string()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("no books found; make sure the file has Title and Author columns")]
    NoBooksFound,
    #[error("select at least one book to import")]
    NothingSelected,
}
