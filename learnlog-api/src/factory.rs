//! Composition root: concrete factories for creating service instances.
//!
//! This is the only place that imports concrete outbound adapters.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rowstore::{Credentials, RowStoreClient, RowStoreError};

use crate::{
    adapters::{inbound::http::ServiceFactory, outbound::rowstore::RowStoreAdapter},
    config::Settings,
    domain::{
        models::{AuthContext, Session},
        ports::{
            inbound::{LogService, SocialService, StreakService},
            outbound::{Clock, IdentityProvider, SystemClock},
        },
        services::{LogServiceImpl, SocialServiceImpl, StreakServiceImpl},
        streak::StreakCalculator,
        AuthError,
    },
};

/// Concrete factory that creates row-store backed services.
///
/// Every request gets its own adapter scoped to the caller's access token;
/// all of them share one HTTP connection pool.
pub struct RowStoreServiceFactory {
    client: RowStoreClient,
    calculator: StreakCalculator,
    notification_limit: usize,
    clock: Arc<dyn Clock>,
}

impl RowStoreServiceFactory {
    pub fn new(settings: &Settings) -> Result<Self, RowStoreError> {
        let client = RowStoreClient::new(
            settings.rowstore.url.clone(),
            Credentials::anonymous(settings.rowstore.anon_key.clone()),
            Duration::from_secs(settings.rowstore.timeout_secs),
        )?;

        Ok(Self {
            client,
            calculator: settings.streak.calculator(),
            notification_limit: settings.notifications.limit_per_source,
            clock: Arc::new(SystemClock),
        })
    }

    fn adapter(&self, auth: &AuthContext) -> Arc<RowStoreAdapter> {
        let mut credentials = self.client.credentials().clone();
        if let Some(session) = auth.session() {
            credentials = credentials.with_access_token(session.access_token());
        }

        Arc::new(RowStoreAdapter::new(
            self.client.with_credentials(credentials),
        ))
    }
}

#[async_trait]
impl ServiceFactory for RowStoreServiceFactory {
    async fn authenticate(&self, access_token: Option<&str>) -> Result<AuthContext, AuthError> {
        let Some(token) = access_token.filter(|t| !t.is_empty()) else {
            return Ok(AuthContext::Anonymous);
        };

        let identity = self.adapter(&AuthContext::Anonymous);
        match identity.resolve(token).await? {
            Some(user_id) => Ok(AuthContext::Authenticated(Session::new(user_id, token))),
            None => {
                tracing::debug!("access token rejected, continuing anonymously");
                Ok(AuthContext::Anonymous)
            }
        }
    }

    fn streak_service(&self, auth: &AuthContext) -> Box<dyn StreakService> {
        Box::new(StreakServiceImpl::new(
            self.adapter(auth),
            self.calculator,
            self.clock.clone(),
        ))
    }

    fn log_service(&self, auth: &AuthContext) -> Box<dyn LogService> {
        let adapter = self.adapter(auth);
        Box::new(LogServiceImpl::new(
            adapter.clone(),
            adapter,
            self.clock.clone(),
        ))
    }

    fn social_service(&self, auth: &AuthContext) -> Box<dyn SocialService> {
        let adapter = self.adapter(auth);
        Box::new(SocialServiceImpl::new(
            adapter.clone(),
            adapter,
            self.notification_limit,
        ))
    }
}
