//! User route handlers.

use axum::extract::{Query, State};
use axum::Json;

use persona_core::user::UserResponse;
use persona_db::queries::users;

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::routes::Pagination;
use crate::state::AppState;

pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.into())
}

pub async fn list_users(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let rows = users::list_users(&state.db, page.skip, page.limit)?;
    Ok(Json(rows.into_iter().map(UserResponse::from).collect()))
}
