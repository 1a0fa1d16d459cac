use std::fmt;

use super::UserId;

/// Who is making a request.
///
/// Built once per request from the bearer token and passed explicitly to
/// every use case that acts on behalf of "the current user".
#[derive(Clone, Default)]
pub enum AuthContext {
    #[default]
    Anonymous,
    Authenticated(Session),
}

/// A resolved end-user session.
#[derive(Clone)]
pub struct Session {
    pub user_id: UserId,
    access_token: String,
}

impl Session {
    pub fn new(user_id: UserId, access_token: impl Into<String>) -> Self {
        Self {
            user_id,
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl AuthContext {
    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthContext::Anonymous => None,
            AuthContext::Authenticated(session) => Some(session),
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.session().map(|s| &s.user_id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("access_token", &"[redacted]")
            .finish()
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthContext::Anonymous => write!(f, "Anonymous"),
            AuthContext::Authenticated(session) => write!(f, "Authenticated({})", session.user_id),
        }
    }
}
