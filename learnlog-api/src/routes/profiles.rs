use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::{ConnectionsResponse, ProfileResponse, UserProfileResponse},
    app_state::AppState,
    auth::Caller,
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_my_profile))
        .route("/search", get(search_users))
        .route("/:username", get(get_user_profile))
        .route("/:username/connections", get(get_connections))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[instrument(name = "search_users", skip(caller, app_state))]
async fn search_users(
    caller: Caller,
    State(app_state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let profiles = service.search_users(&query.q).await?;

    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}

#[instrument(name = "get_my_profile", skip(caller, app_state))]
async fn get_my_profile(
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let page = service.my_profile(&caller).await?;

    Ok(Json(page.into()))
}

#[instrument(name = "get_user_profile", skip(caller, app_state))]
async fn get_user_profile(
    Path(username): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let page = service.user_profile(&caller, &username).await?;

    Ok(Json(page.into()))
}

#[instrument(name = "get_connections", skip(caller, app_state))]
async fn get_connections(
    Path(username): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<ConnectionsResponse>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let connections = service.connections(&username).await?;

    Ok(Json(connections.into()))
}
