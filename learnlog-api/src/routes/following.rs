use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    adapters::inbound::http::ProfileResponse, app_state::AppState, auth::Caller, routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_following))
}

#[instrument(name = "list_following", skip(caller, app_state))]
async fn list_following(
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProfileResponse>>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let profiles = service.following(&caller).await?;

    Ok(Json(profiles.into_iter().map(ProfileResponse::from).collect()))
}
