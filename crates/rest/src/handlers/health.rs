//! Health check endpoint handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Asks the backend for its cluster health, so a green response means the
/// whole read/write path is serving.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - Server and backend are healthy
/// - `503 Service Unavailable` - Backend unreachable or unhealthy
pub async fn health_handler<B>(State(state): State<AppState<B>>) -> Response
where
    B: fleet_search::DocumentBackend + Send + Sync,
{
    debug!("Processing health check request");

    let backend_name = state.backend().backend_name();

    match state.backend().health_check().await {
        Ok(()) => {
            let body = serde_json::json!({
                "status": "healthy",
                "backend": backend_name,
                "timestamp": chrono::Utc::now().to_rfc3339()
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::warn!(backend = backend_name, error = %e, "Health check failed");
            let body = serde_json::json!({
                "status": "unhealthy",
                "backend": backend_name,
                "message": e.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}
