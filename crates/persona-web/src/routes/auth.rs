//! Authentication route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use persona_core::auth::create_access_token;
use persona_core::user::{self, UserResponse};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// OAuth2-style form login: the `username` field carries the email.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("Password must not be empty".to_string()));
    }

    let user = user::register(
        &state.db,
        &state.graph,
        &req.email,
        &req.password,
        req.full_name.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<Token>, ApiError> {
    issue_token(&state, &form.username, &form.password)
}

pub async fn login_json(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Token>, ApiError> {
    issue_token(&state, &req.email, &req.password)
}

fn issue_token(state: &AppState, email: &str, password: &str) -> Result<Json<Token>, ApiError> {
    let user = user::authenticate(&state.db, email, password)?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect email or password".to_string()))?;

    if !user.is_active {
        return Err(ApiError::BadRequest("Inactive user".to_string()));
    }

    let access_token = create_access_token(
        &user.email,
        &state.config.auth.secret_key,
        state.config.auth.token_ttl_minutes,
    )?;

    Ok(Json(Token {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
