//! Route configuration.

use axum::{
    Router,
    routing::{get, post},
};
use fleet_search::backend::DocumentBackend;

use crate::handlers;
use crate::state::AppState;

/// Creates all HTTP API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /health` - Health check
///
/// ## Person
/// - `POST /api/person` - Save
/// - `GET /api/person/{id}` - Fetch by id
///
/// ## Vehicle
/// - `POST /api/vehicle` - Save
/// - `GET /api/vehicle/{id}` - Fetch by id
/// - `POST /api/vehicle/search` - Filtered search
/// - `GET /api/vehicle/created-since/{timestamp}` - Date-cursor search
pub fn create_routes<B>(state: AppState<B>) -> Router
where
    B: DocumentBackend + Send + Sync + 'static,
{
    Router::new()
        // System-level routes
        .route("/health", get(handlers::health_handler::<B>))
        // Person routes
        .route("/api/person", post(handlers::save_person_handler::<B>))
        .route("/api/person/{id}", get(handlers::find_person_handler::<B>))
        // Vehicle routes
        .route("/api/vehicle", post(handlers::save_vehicle_handler::<B>))
        .route(
            "/api/vehicle/search",
            post(handlers::search_vehicles_handler::<B>),
        )
        .route(
            "/api/vehicle/created-since/{timestamp}",
            get(handlers::vehicles_created_since_handler::<B>),
        )
        .route(
            "/api/vehicle/{id}",
            get(handlers::find_vehicle_handler::<B>),
        )
        // State
        .with_state(state)
}
