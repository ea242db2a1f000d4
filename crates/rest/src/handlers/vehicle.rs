//! Vehicle endpoints.
//!
//! Save, fetch-by-id, filter search, and created-since search.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use fleet_search::document::{Document, Vehicle};
use fleet_search::filter::SearchRequest;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for saving a vehicle.
///
/// # HTTP Request
///
/// `POST /api/vehicle`
///
/// # Response
///
/// - `201 Created` - Record indexed
/// - `502 Bad Gateway` - The search backend rejected the write
pub async fn save_vehicle_handler<B>(
    State(state): State<AppState<B>>,
    Json(mut vehicle): Json<Vehicle>,
) -> RestResult<Response>
where
    B: fleet_search::DocumentBackend + Send + Sync,
{
    if vehicle.id.is_empty() {
        vehicle.id = uuid::Uuid::new_v4().to_string();
    }

    debug!(id = %vehicle.id, "Processing vehicle save request");

    state.vehicles().try_index(&vehicle).await?;

    let location = format!("{}/api/vehicle/{}", state.base_url(), vehicle.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(vehicle),
    )
        .into_response())
}

/// Handler for fetching a vehicle by id.
///
/// # HTTP Request
///
/// `GET /api/vehicle/{id}`
///
/// # Response
///
/// - `200 OK` - Record found
/// - `404 Not Found` - No record under this id
/// - `502 Bad Gateway` - The search backend failed
pub async fn find_vehicle_handler<B>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    B: fleet_search::DocumentBackend + Send + Sync,
{
    debug!(id = %id, "Processing vehicle read request");

    match state.vehicles().try_get_by_id(&id).await? {
        Some(vehicle) => Ok((StatusCode::OK, Json(vehicle)).into_response()),
        None => Err(RestError::NotFound {
            index: Vehicle::index().to_string(),
            id,
        }),
    }
}

/// Handler for searching vehicles with a filter request.
///
/// # HTTP Request
///
/// `POST /api/vehicle/search` with a [`SearchRequest`] body. An empty body
/// (`{}`) matches every vehicle. The optional `created_since` field restricts
/// results to records created strictly after the given instant.
///
/// # Response
///
/// - `200 OK` - JSON array of vehicles, in backend order
/// - `400 Bad Request` - Malformed criteria
/// - `502 Bad Gateway` - The search backend failed
pub async fn search_vehicles_handler<B>(
    State(state): State<AppState<B>>,
    Json(request): Json<SearchRequest>,
) -> RestResult<Response>
where
    B: fleet_search::DocumentBackend + Send + Sync,
{
    debug!(
        criteria = request.criteria.len(),
        created_since = ?request.created_since,
        "Processing vehicle search request"
    );

    let vehicles = state.vehicles().try_search(&request).await?;
    Ok((StatusCode::OK, Json(vehicles)).into_response())
}

/// Handler for fetching vehicles created after a given instant.
///
/// # HTTP Request
///
/// `GET /api/vehicle/created-since/{timestamp}` where `timestamp` is
/// RFC 3339 (e.g. `2023-01-01T00:00:00Z`).
///
/// # Response
///
/// - `200 OK` - JSON array of vehicles created strictly after the instant
/// - `400 Bad Request` - Unparseable timestamp
/// - `502 Bad Gateway` - The search backend failed
pub async fn vehicles_created_since_handler<B>(
    State(state): State<AppState<B>>,
    Path(timestamp): Path<String>,
) -> RestResult<Response>
where
    B: fleet_search::DocumentBackend + Send + Sync,
{
    let since: DateTime<Utc> = timestamp
        .parse()
        .map_err(|e| RestError::BadRequest {
            message: format!("Invalid timestamp '{}': {}", timestamp, e),
        })?;

    debug!(since = %since, "Processing vehicles created-since request");

    let vehicles = state.vehicles().try_search_created_since(since).await?;
    Ok((StatusCode::OK, Json(vehicles)).into_response())
}
