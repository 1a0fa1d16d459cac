use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotAuthenticated,
    ValidationFailed,
    UpstreamUnavailable,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

use crate::domain::{AuthError, ImportError, LogError, SocialError, StreakError};

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message).with_code(ErrorCode::ValidationFailed)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message).with_code(ErrorCode::NotAuthenticated)
    }

    /// The row store or identity provider failed or returned bad data.
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message).with_code(ErrorCode::UpstreamUnavailable)
    }

    #[cfg(test)]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StreakError> for ApiError {
    fn from(err: StreakError) -> Self {
        tracing::error!("Streak calculation failed: {}", err);
        Self::bad_gateway("could not read activity history")
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        tracing::error!("Authentication failed: {}", err);
        Self::bad_gateway("identity provider unavailable")
    }
}

impl From<LogError> for ApiError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::NotAuthenticated => Self::unauthorized("Not authenticated"),
            LogError::Invalid(_) => Self::bad_request(err.to_string()),
            LogError::NotFound(_) => Self::not_found(err.to_string()),
            LogError::Store(ref e) => {
                tracing::error!("Log store error: {}", e);
                Self::bad_gateway("log store request failed")
            }
        }
    }
}

impl From<SocialError> for ApiError {
    fn from(err: SocialError) -> Self {
        match err {
            SocialError::NotAuthenticated => Self::unauthorized("Not authenticated"),
            SocialError::CannotFollowSelf | SocialError::InvalidComment(_) => {
                Self::bad_request(err.to_string())
            }
            SocialError::UserNotFound(_) | SocialError::CommentNotFound(_) => {
                Self::not_found(err.to_string())
            }
            SocialError::Store(ref e) => {
                tracing::error!("Social store error: {}", e);
                Self::bad_gateway("social store request failed")
            }
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        Self::bad_request(err.to_string())
    }
}
