use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, Date};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{CommentResponse, LikeStateResponse, LogExportResponse, LogResponse},
    app_state::AppState,
    auth::Caller,
    domain::models::{ContentType, LogId, NewLogEntry},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_my_logs).post(create_log))
        .route("/feed", get(get_feed))
        .route("/export", get(export_logs))
        .route("/:log_id", delete(delete_log))
        .route("/:log_id/comments", get(list_comments).post(add_comment))
        .route("/:log_id/comments/:comment_id", delete(delete_comment))
        .route("/:log_id/like", get(get_like_state).post(toggle_like))
}

// ============================================================================
// Logs
// ============================================================================

#[instrument(name = "list_my_logs", skip(caller, app_state))]
async fn list_my_logs(
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<LogResponse>>, ApiError> {
    let service = app_state.factory.log_service(&caller);
    let logs = service.my_logs(&caller).await?;

    Ok(Json(logs.into_iter().map(LogResponse::from).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogPayload {
    content_type: ContentType,
    title: String,
    creator: Option<String>,
    consumed_date: Date,
    key_points: String,
    practical_application: String,
    summary: String,
    #[serde(default)]
    is_shared: bool,
}

#[instrument(name = "create_log", skip(caller, app_state, body))]
async fn create_log(
    caller: Caller,
    State(app_state): State<AppState>,
    Json(body): Json<CreateLogPayload>,
) -> Result<(StatusCode, Json<LogResponse>), ApiError> {
    let entry = NewLogEntry::new(
        body.content_type,
        &body.title,
        body.creator.as_deref(),
        body.consumed_date,
        &body.key_points,
        &body.practical_application,
        &body.summary,
        body.is_shared,
    )?;

    let service = app_state.factory.log_service(&caller);
    let log = service.create_log(&caller, &entry).await?;

    Ok((StatusCode::CREATED, Json(log.into())))
}

#[instrument(name = "get_feed", skip(caller, app_state))]
async fn get_feed(
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<LogResponse>>, ApiError> {
    let service = app_state.factory.log_service(&caller);
    let logs = service.feed(&caller).await?;

    Ok(Json(logs.into_iter().map(LogResponse::from).collect()))
}

/// All of the caller's logs as a JSON attachment.
#[instrument(name = "export_logs", skip(caller, app_state))]
async fn export_logs(
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let service = app_state.factory.log_service(&caller);
    let export = service.export_logs(&caller).await?;

    let stamp = export
        .exported_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| export.exported_at.unix_timestamp().to_string());
    let disposition = format!("attachment; filename=\"learning-logs-{stamp}.json\"");

    Ok((
        [(header::CONTENT_DISPOSITION, disposition)],
        Json(LogExportResponse::from(export)),
    ))
}

#[instrument(name = "delete_log", skip(caller, app_state))]
async fn delete_log(
    Path(log_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let service = app_state.factory.log_service(&caller);
    service.delete_log(&caller, &LogId::from(log_id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

#[instrument(name = "list_comments", skip(caller, app_state))]
async fn list_comments(
    Path(log_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let comments = service.comments(&LogId::from(log_id)).await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct CommentPayload {
    content: String,
}

#[instrument(name = "add_comment", skip(caller, app_state, body))]
async fn add_comment(
    Path(log_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
    Json(body): Json<CommentPayload>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let service = app_state.factory.social_service(&caller);
    let comment = service
        .add_comment(&caller, &LogId::from(log_id), &body.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

#[instrument(name = "delete_comment", skip(caller, app_state))]
async fn delete_comment(
    Path((log_id, comment_id)): Path<(String, String)>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let service = app_state.factory.social_service(&caller);
    service
        .delete_comment(&caller, &LogId::from(log_id), &comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Likes
// ============================================================================

#[instrument(name = "get_like_state", skip(caller, app_state))]
async fn get_like_state(
    Path(log_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<LikeStateResponse>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let state = service.like_state(&caller, &LogId::from(log_id)).await?;

    Ok(Json(state.into()))
}

#[instrument(name = "toggle_like", skip(caller, app_state))]
async fn toggle_like(
    Path(log_id): Path<String>,
    caller: Caller,
    State(app_state): State<AppState>,
) -> Result<Json<LikeStateResponse>, ApiError> {
    let service = app_state.factory.social_service(&caller);
    let state = service.toggle_like(&caller, &LogId::from(log_id)).await?;

    Ok(Json(state.into()))
}
