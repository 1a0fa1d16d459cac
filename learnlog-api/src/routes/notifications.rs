use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    adapters::inbound::http::NotificationResponse, app_state::AppState, auth::Caller,
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_notifications))
}

#[instrument(name = "list_notifications", skip(caller, app_state))]
async fn list_notifications(
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let notifications = service.notifications(&caller).await?;

    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}
