//! API module
//!
//! Contains HTTP request handlers and the router that wires them together

pub mod chat;
pub mod meta;
pub mod middleware;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use chat::{ChatRequest, INVALID_MODEL_MESSAGE};

/// Build the application router with all routes and middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(meta::root))
        .route("/api/health", get(meta::health_check))
        .route("/api/models", get(meta::list_models))
        .route("/messages", post(chat::chat_endpoint))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
