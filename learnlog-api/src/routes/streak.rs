use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    adapters::inbound::http::StreakResponse, app_state::AppState, auth::Caller, routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(get_my_streak))
}

/// Streak of the caller. Anonymous callers get `0` with status `no_activity`.
#[instrument(name = "get_my_streak", skip(caller, app_state))]
async fn get_my_streak(
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<StreakResponse>, ApiError> {
    let service = app_state.factory.streak_service(&caller);
    let streak = service.get_current_user_streak(&caller).await?;

    Ok(Json(streak.into()))
}
