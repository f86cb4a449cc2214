//! API error types.

use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use vdoc_openai::OpenAiError;
use vdoc_pipeline::PipelineError;
use vdoc_store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

static PRODUCTION: OnceLock<bool> = OnceLock::new();

/// Install the production flag error responses render under.
///
/// Called once during router construction with the value from
/// `ApiConfig`; until then responses render in development mode.
pub fn set_production_mode(production: bool) {
    let _ = PRODUCTION.set(production);
}

fn production_mode() -> bool {
    PRODUCTION.get().copied().unwrap_or(false)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Generation error: {0}")]
    Generation(#[from] OpenAiError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_)
            | ApiError::Pipeline(_)
            | ApiError::Store(_)
            | ApiError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body text. Failed runs surface the failing stage;
    /// internal diagnostic detail stays out of production responses.
    fn detail(&self, production: bool) -> String {
        match self {
            ApiError::Pipeline(e) if production => {
                format!("Documentary generation failed in the {} stage", e.stage())
            }
            ApiError::Pipeline(e) => {
                format!(
                    "Documentary generation failed in the {} stage: {}",
                    e.stage(),
                    e
                )
            }
            ApiError::Internal(_) | ApiError::Store(_) | ApiError::Generation(_) if production => {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.detail(production_mode()),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdoc_pipeline::SynthesisError;

    #[test]
    fn request_errors_map_to_client_statuses() {
        assert_eq!(
            ApiError::bad_request("no file").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn pipeline_errors_are_server_errors() {
        let err = ApiError::Pipeline(PipelineError::Synthesis(SynthesisError::Io(
            std::io::Error::other("disk full"),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn production_responses_name_only_the_failing_stage() {
        let err = ApiError::Pipeline(PipelineError::Synthesis(SynthesisError::Io(
            std::io::Error::other("disk full"),
        )));
        assert_eq!(
            err.detail(true),
            "Documentary generation failed in the speech stage"
        );
        assert!(err.detail(false).contains("disk full"));
    }

    #[test]
    fn production_responses_hide_internal_detail() {
        let err = ApiError::Store(StoreError::unavailable("griddb down"));
        assert_eq!(err.detail(true), "An internal error occurred");
        assert!(err.detail(false).contains("griddb down"));

        // Client errors keep their message in both modes.
        let err = ApiError::bad_request("no file");
        assert_eq!(err.detail(true), err.detail(false));
    }
}
