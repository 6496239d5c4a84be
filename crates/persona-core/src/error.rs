//! Centralized error types for Persona.

use thiserror::Error;

/// Main error type for Persona operations.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Could not validate credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] persona_db::DbError),

    #[error("Graph error: {0}")]
    Graph(#[from] persona_graph::GraphError),
}

/// Result type for Persona operations.
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
