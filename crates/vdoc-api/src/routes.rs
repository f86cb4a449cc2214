//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::generated::{generate_narrative, generate_title};
use crate::handlers::health::health;
use crate::handlers::metadata::{get_metadata, list_metadata, save_metadata};
use crate::handlers::upload::upload_video;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    crate::error::set_production_mode(state.config.is_production());

    let api_routes = Router::new()
        .route("/upload", post(upload_video))
        .route("/metadata", get(list_metadata).post(save_metadata))
        .route("/metadata/:id", get(get_metadata))
        .route("/generate/narrative", post(generate_narrative))
        .route("/generate/title", post(generate_title));

    // Allow the configured upload size plus multipart framing overhead.
    let body_limit = state.config.max_upload_bytes + 1024 * 1024;

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .nest_service("/audio", ServeDir::new(&state.config.audio_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
