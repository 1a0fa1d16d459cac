//! Identity provider port (outbound).

use async_trait::async_trait;

use crate::domain::{models::UserId, AuthError};

/// Resolves access tokens issued by the hosted auth service.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// The user behind `access_token`, or `None` when the token is rejected.
    async fn resolve(&self, access_token: &str) -> Result<Option<UserId>, AuthError>;
}
