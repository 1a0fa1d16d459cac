use std::ops::Deref;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{app_state::AppState, domain::models::AuthContext, routes::ApiError};

/// A custom Axum extractor that resolves the caller from the
/// `Authorization: Bearer <token>` header.
///
/// Never rejects a missing, malformed or expired token: those callers are
/// [`AuthContext::Anonymous`] and each use case decides what anonymous
/// access means. Only an unreachable identity provider fails the request.
#[derive(Debug, Clone)]
pub struct Caller(pub AuthContext);

impl Deref for Caller {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok();
        let token = bearer.as_ref().map(|TypedHeader(auth)| auth.token());

        let auth = state.factory.authenticate(token).await?;
        Ok(Caller(auth))
    }
}
