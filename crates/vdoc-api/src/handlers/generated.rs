//! On-demand text generation routes.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vdoc_models::GeneratePayload;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NarrativeResponse {
    pub narrative: String,
}

#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub title: String,
}

/// Handle `POST /api/generate/narrative`.
pub async fn generate_narrative(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePayload>,
) -> ApiResult<Json<NarrativeResponse>> {
    if payload.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("Prompt cannot be empty"));
    }
    let narrative = state
        .generation
        .generate_narrative_text(&payload.prompt)
        .await?;
    Ok(Json(NarrativeResponse { narrative }))
}

/// Handle `POST /api/generate/title`.
pub async fn generate_title(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePayload>,
) -> ApiResult<Json<TitleResponse>> {
    if payload.prompt.trim().is_empty() {
        return Err(ApiError::bad_request("Prompt cannot be empty"));
    }
    let title = state.generation.generate_title(&payload.prompt).await?;
    Ok(Json(TitleResponse { title }))
}
