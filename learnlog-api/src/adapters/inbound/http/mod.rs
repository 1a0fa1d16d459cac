//! HTTP adapter: the factory seam between axum handlers and the domain.
//!
//! Handlers only see the inbound ports. The concrete implementation lives in
//! `crate::factory` (the composition root), where outbound adapters are wired.

mod responses;

pub use responses::*;

use async_trait::async_trait;

use crate::domain::{
    models::AuthContext,
    ports::inbound::{LogService, SocialService, StreakService},
    AuthError,
};

/// Creates per-request service instances acting on behalf of the caller.
#[async_trait]
pub trait ServiceFactory: Send + Sync + 'static {
    /// Resolve a bearer token into an auth context. A missing or rejected
    /// token yields [`AuthContext::Anonymous`].
    async fn authenticate(&self, access_token: Option<&str>) -> Result<AuthContext, AuthError>;

    fn streak_service(&self, auth: &AuthContext) -> Box<dyn StreakService>;

    fn log_service(&self, auth: &AuthContext) -> Box<dyn LogService>;

    fn social_service(&self, auth: &AuthContext) -> Box<dyn SocialService>;
}
