//! API error type and its HTTP mapping.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use persona_core::CoreError;
use persona_db::DbError;
use persona_graph::GraphError;

/// Error returned by route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// 401 with a `WWW-Authenticate: Bearer` challenge.
    Unauthorized(String),
    /// 400
    BadRequest(String),
    /// 404
    NotFound(String),
    /// 500, with the underlying store message attached for diagnosability.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized("Could not validate credentials".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.detail() }));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCredentials => ApiError::invalid_credentials(),
            CoreError::UserNotFound => ApiError::NotFound(err.to_string()),
            CoreError::InactiveUser => ApiError::BadRequest(err.to_string()),
            CoreError::Validation(msg) => ApiError::BadRequest(msg),
            CoreError::Token(msg) | CoreError::PasswordHash(msg) => ApiError::Internal(msg),
            CoreError::Database(e) => e.into(),
            CoreError::Graph(e) => e.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(_) => ApiError::NotFound(err.to_string()),
            DbError::Duplicate(_) => ApiError::BadRequest(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::EmptyUpdate => ApiError::BadRequest("No fields to update".to_string()),
            GraphError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::invalid_credentials().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_error_mapping() {
        assert_eq!(
            ApiError::from(CoreError::UserNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CoreError::InactiveUser).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CoreError::validation("bad")).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_empty_update_maps_to_bad_request() {
        let err = ApiError::from(GraphError::EmptyUpdate);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "No fields to update");
    }

    #[test]
    fn test_db_error_mapping() {
        assert_eq!(
            ApiError::from(DbError::NotFound("user".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DbError::Duplicate("user".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DbError::Migration("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_carries_bearer_challenge() {
        let response = ApiError::invalid_credentials().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }
}
