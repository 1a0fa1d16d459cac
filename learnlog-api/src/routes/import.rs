use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    adapters::inbound::http::ImportSummaryResponse,
    app_state::AppState,
    auth::Caller,
    domain::{models::ImportedBook, ImportError},
    routes::ApiError,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(import_books))
        .route("/preview", post(preview_import))
}

/// Parse an uploaded CSV export and return the books found, storing nothing.
#[instrument(name = "preview_import", skip(caller, app_state, body))]
async fn preview_import(
    caller: Caller,
    State(app_state): State<AppState>,
    body: String,
) -> Result<Json<Vec<ImportedBook>>, ApiError> {
    let service = app_state.factory.log_service(&caller);
    let books = service.preview_import(&body)?;

    tracing::debug!(books = books.len(), "parsed import preview");
    Ok(Json(books))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    books: Vec<ImportedBook>,
}

#[instrument(name = "import_books", skip(caller, app_state, body))]
async fn import_books(
    caller: Caller,
    State(app_state): State<AppState>,
    Json(body): Json<ImportPayload>,
) -> Result<Json<ImportSummaryResponse>, ApiError> {
    if body.books.is_empty() {
        return Err(ImportError::NothingSelected.into());
    }

    let service = app_state.factory.log_service(&caller);
    let summary = service.import_books(&caller, &body.books).await?;

    Ok(Json(summary.into()))
}
