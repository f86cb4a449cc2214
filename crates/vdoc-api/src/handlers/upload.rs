//! Video upload: receive the file, run the pipeline, return the result.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::Utc;
use tokio::fs;
use tracing::info;
use vdoc_models::UploadResponse;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Handle `POST /api/upload`.
///
/// Rejects non-video uploads before any pipeline work starts. The
/// stored file keeps its original name behind a millisecond timestamp
/// so concurrent uploads of the same file cannot collide.
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !is_allowed_content_type(&state.config.allowed_content_types, &content_type) {
            return Err(ApiError::bad_request(format!(
                "Invalid file type '{content_type}'. Allowed: {}",
                state.config.allowed_content_types.join(", ")
            )));
        }

        let original_name = sanitize_filename(field.file_name().unwrap_or("upload.mp4"));
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {e}")))?;
        file = Some((original_name, bytes.to_vec()));
        break;
    }

    let (original_name, bytes) = file
        .ok_or_else(|| ApiError::bad_request("No file uploaded or invalid file type."))?;
    if bytes.is_empty() {
        return Err(ApiError::bad_request("Uploaded file is empty."));
    }

    let stored_name = format!("{}-{}", Utc::now().timestamp_millis(), original_name);
    fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create upload dir: {e}")))?;
    let video_path = state.config.upload_dir.join(&stored_name);
    fs::write(&video_path, &bytes)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store upload: {e}")))?;
    info!(video = %video_path.display(), bytes = bytes.len(), "Upload stored");

    let output = state.pipeline.run(&video_path).await?;

    Ok(Json(UploadResponse {
        message: format!("File uploaded and processed: {stored_name}"),
        filename: output.filename,
        narrative: output.narrative,
        title: output.title,
        voice: output.voice,
    }))
}

fn is_allowed_content_type(allowed: &[String], content_type: &str) -> bool {
    allowed.iter().any(|a| a == content_type)
}

/// Keep only the final path component and drop characters that would
/// let an upload name escape the upload directory.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if cleaned.is_empty() {
        "upload.mp4".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configured_content_types_pass() {
        let allowed = vec!["video/mp4".to_string()];
        assert!(is_allowed_content_type(&allowed, "video/mp4"));
        assert!(!is_allowed_content_type(&allowed, "video/webm"));
        assert!(!is_allowed_content_type(&allowed, "image/png"));
        assert!(!is_allowed_content_type(&allowed, ""));
    }

    #[test]
    fn filenames_lose_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/tmp/clip.mp4"), "clip.mp4");
        assert_eq!(sanitize_filename("my clip!.mp4"), "myclip.mp4");
    }

    #[test]
    fn empty_filenames_get_a_default() {
        assert_eq!(sanitize_filename(""), "upload.mp4");
        assert_eq!(sanitize_filename("///"), "upload.mp4");
    }
}
