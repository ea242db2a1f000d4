//! Person endpoints.
//!
//! `POST /api/person` and `GET /api/person/{id}`.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use fleet_search::document::{Document, Person};
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for saving a person.
///
/// # HTTP Request
///
/// `POST /api/person`
///
/// # Response
///
/// - `201 Created` - Record indexed; body echoes the stored representation
/// - `502 Bad Gateway` - The search backend rejected the write
pub async fn save_person_handler<B>(
    State(state): State<AppState<B>>,
    Json(mut person): Json<Person>,
) -> RestResult<Response>
where
    B: fleet_search::DocumentBackend + Send + Sync,
{
    // Assign an id when the client omits one
    if person.id.is_empty() {
        person.id = uuid::Uuid::new_v4().to_string();
    }

    debug!(id = %person.id, "Processing person save request");

    state.persons().try_index(&person).await?;

    let location = format!("{}/api/person/{}", state.base_url(), person.id);
    debug!(id = %person.id, "Person saved");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(person),
    )
        .into_response())
}

/// Handler for fetching a person by id.
///
/// # HTTP Request
///
/// `GET /api/person/{id}`
///
/// # Response
///
/// - `200 OK` - Record found, returns the person
/// - `404 Not Found` - No record under this id
/// - `502 Bad Gateway` - The search backend failed
pub async fn find_person_handler<B>(
    State(state): State<AppState<B>>,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    B: fleet_search::DocumentBackend + Send + Sync,
{
    debug!(id = %id, "Processing person read request");

    match state.persons().try_get_by_id(&id).await? {
        Some(person) => Ok((StatusCode::OK, Json(person)).into_response()),
        None => {
            debug!(id = %id, "Person not found");
            Err(RestError::NotFound {
                index: Person::index().to_string(),
                id,
            })
        }
    }
}
