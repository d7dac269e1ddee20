//! Liveness and readiness handlers.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Banner returned by `GET /`.
pub const BANNER: &str = "UB-Jewellers Server is up and running!";

/// Root liveness banner.
pub async fn index() -> &'static str {
    BANNER
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies store connectivity before returning OK.
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
