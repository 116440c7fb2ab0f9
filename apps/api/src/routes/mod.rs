pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route("/api/v1/match/text", post(handlers::handle_match_text))
        .route(
            "/api/v1/match/upload",
            post(handlers::handle_match_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/similarity", post(handlers::handle_similarity))
        .with_state(state)
}
