use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{FollowStatusResponse, StreakResponse},
    app_state::AppState,
    auth::Caller,
    domain::models::UserId,
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/streak", get(get_user_streak))
        .route(
            "/:user_id/follow",
            get(get_follow_status).post(follow).delete(unfollow),
        )
}

#[instrument(name = "get_user_streak", skip(caller, app_state))]
async fn get_user_streak(
    Path(user_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<StreakResponse>, ApiError> {
    let service = app_state.factory.streak_service(&caller);
    let streak = service.get_streak(&UserId::from(user_id)).await?;

    Ok(Json(streak.into()))
}

#[instrument(name = "get_follow_status", skip(caller, app_state))]
async fn get_follow_status(
    Path(user_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<FollowStatusResponse>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let following = service
        .is_following(&caller, &UserId::from(user_id))
        .await?;

    Ok(Json(FollowStatusResponse { following }))
}

#[instrument(name = "follow", skip(caller, app_state))]
async fn follow(
    Path(user_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let service = app_state.factory.social_service(&caller);
    service.follow(&caller, &UserId::from(user_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "unfollow", skip(caller, app_state))]
async fn unfollow(
    Path(user_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let service = app_state.factory.social_service(&caller);
    service.unfollow(&caller, &UserId::from(user_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
