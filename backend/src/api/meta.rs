//! Service metadata endpoints
//!
//! Root redirect, health check and model catalog.

use crate::catalog::{Provider, ALLOWED_MODEL_NAMES};
use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::Serialize;

/// Greeting returned by `GET /` when no dashboard URL is configured
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    /// Short description of the API
    pub message: String,
    /// Always "ok"
    pub status: String,
}

/// Liveness report
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" while the server answers
    pub status: String,
    /// Crate version
    pub version: String,
    /// Human-readable status
    pub message: String,
}

/// One provider and the models offered for it
#[derive(Debug, Serialize)]
pub struct ProviderModels {
    /// Provider name
    pub provider: Provider,
    /// Models offered for the provider
    pub models: Vec<String>,
}

/// Model catalog response
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Every model the chat endpoint accepts
    pub allowed_models: Vec<String>,
    /// Provider/model pairs offered to clients
    pub providers: Vec<ProviderModels>,
}

/// GET / - Redirect to the dashboard when one is configured
pub async fn root(State(state): State<AppState>) -> Response {
    match state.dashboard_url {
        Some(url) => Redirect::temporary(&url).into_response(),
        None => Json(HelloResponse {
            message: "Agent chat API. POST /messages to talk to an agent.".to_string(),
            status: "ok".to_string(),
        })
        .into_response(),
    }
}

/// GET /api/health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}

/// GET /api/models - Allow-list and provider catalog
pub async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        allowed_models: ALLOWED_MODEL_NAMES.iter().map(|m| m.to_string()).collect(),
        providers: Provider::available()
            .into_iter()
            .map(|provider| ProviderModels {
                provider,
                models: provider.models().iter().map(|m| m.to_string()).collect(),
            })
            .collect(),
    })
}
