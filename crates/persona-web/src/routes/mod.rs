//! Route handlers.

pub mod auth;
pub mod graph;
pub mod persons;
pub mod users;

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

/// Store-side pagination parameters shared by the list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub(crate) fn default_limit() -> i64 {
    100
}

/// Welcome payload on the root path.
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Persona API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let page: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);

        let page: Pagination = serde_json::from_str(r#"{"skip": 10, "limit": 5}"#).unwrap();
        assert_eq!(page.skip, 10);
        assert_eq!(page.limit, 5);
    }
}
