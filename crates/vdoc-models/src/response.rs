//! HTTP payload types shared between the pipeline and the API.

use serde::{Deserialize, Serialize};

/// Success payload returned to the upload caller once a run completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// Stored video reference.
    pub filename: String,
    pub narrative: String,
    pub title: String,
    /// Synthesized speech artifact filename.
    pub voice: String,
}

/// Body of the on-demand generation routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayload {
    pub prompt: String,
}
