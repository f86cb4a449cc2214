//! Documentary metadata routes.

use axum::extract::{Path, State};
use axum::Json;
use vdoc_models::{DocumentaryMetadata, NewDocumentary};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Handle `GET /api/metadata/:id`.
pub async fn get_metadata(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DocumentaryMetadata>> {
    let record = state
        .store
        .get_documentary(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Documentary not found"))?;
    Ok(Json(record))
}

/// Handle `GET /api/metadata`.
pub async fn list_metadata(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DocumentaryMetadata>>> {
    Ok(Json(state.store.list_documentaries().await?))
}

/// Handle `POST /api/metadata` — save a caller-supplied record.
pub async fn save_metadata(
    State(state): State<AppState>,
    Json(record): Json<NewDocumentary>,
) -> ApiResult<Json<DocumentaryMetadata>> {
    Ok(Json(state.store.save_documentary(record).await?))
}
