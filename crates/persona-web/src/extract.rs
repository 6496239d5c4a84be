//! Bearer-credential extractors.
//!
//! `AuthUser` is the strict mode: any failure rejects the request.
//! `MaybeUser` is the optional mode used by the public browsing endpoints:
//! every failure, from a missing header to an inactive account, silently
//! degrades to an anonymous caller.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use persona_core::auth::verify_token;
use persona_core::CoreError;
use persona_db::queries::users::{self, UserRow};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller. Rejects when absent or invalid.
pub struct AuthUser(pub UserRow);

/// The caller, if any. Never rejects.
pub struct MaybeUser(pub Option<UserRow>);

impl MaybeUser {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn resolve_user(parts: &Parts, state: &AppState) -> Result<UserRow, ApiError> {
    let token = bearer_token(parts).ok_or(CoreError::InvalidCredentials)?;
    let email = verify_token(token, &state.config.auth.secret_key)
        .ok_or(CoreError::InvalidCredentials)?;

    let user = users::get_user_by_email(&state.db, &email)?
        .ok_or(CoreError::UserNotFound)?;

    if !user.is_active {
        return Err(CoreError::InactiveUser.into());
    }

    Ok(user)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state).map(AuthUser)
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_user(parts, state).ok()))
    }
}
