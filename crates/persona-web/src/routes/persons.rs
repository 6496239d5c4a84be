//! Person CRUD route handlers. All of these require authentication.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

use persona_core::user;
use persona_graph::person;
use persona_graph::{NewPerson, PersonPatch, PersonRecord, Visibility};

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::routes::Pagination;
use crate::state::AppState;

pub async fn create_person(
    AuthUser(current_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<NewPerson>,
) -> Result<(StatusCode, Json<PersonRecord>), ApiError> {
    let record = person::create_person(&state.graph, &req, &current_user.email).await?;

    // First node created by an unlinked account becomes its profile node.
    if let Err(e) = user::link_person_if_unlinked(&state.db, &current_user, &record.id) {
        warn!(email = %current_user.email, error = %e, "Failed to record Person back-reference");
    }

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_persons(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<PersonRecord>>, ApiError> {
    let records =
        person::list_persons(&state.graph, page.skip, page.limit, Visibility::Full).await?;
    Ok(Json(records))
}

pub async fn get_person(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PersonRecord>, ApiError> {
    let record = person::get_person(&state.graph, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Person not found".to_string()))?;
    Ok(Json(record))
}

pub async fn update_person(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PersonPatch>,
) -> Result<Json<PersonRecord>, ApiError> {
    let record = person::update_person(&state.graph, &id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Person not found".to_string()))?;
    Ok(Json(record))
}

/// The Person node linked to the calling account, when one exists.
pub async fn my_person(
    AuthUser(current_user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<PersonRecord>, ApiError> {
    let person_id = current_user
        .linked_person_id
        .as_deref()
        .filter(|_| current_user.is_linked)
        .ok_or_else(|| {
            ApiError::NotFound("Person node not found for current user".to_string())
        })?;

    // The back-reference is weak: the node may have been deleted since.
    let record = person::get_person(&state.graph, person_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Person node not found".to_string()))?;
    Ok(Json(record))
}
