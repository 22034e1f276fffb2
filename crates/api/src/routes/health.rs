//! Welcome and health endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

/// Service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Showcase API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the store is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Health payload under the API prefix.
pub async fn api_health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
