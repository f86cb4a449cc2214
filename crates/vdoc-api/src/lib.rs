//! Axum HTTP boundary for documentary generation.
//!
//! Thin adapter over the pipeline: multipart upload in, JSON payload
//! out, plus metadata reads and static serving of stored videos and
//! synthesized audio.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
