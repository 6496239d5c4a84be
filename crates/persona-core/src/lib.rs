//! Persona Core Library
//!
//! Domain services for the Person-graph backend: credential handling,
//! user registration, configuration, and response shaping.

pub mod auth;
pub mod config;
pub mod error;
pub mod user;
pub mod view;

pub use config::AppConfig;
pub use error::{CoreError, CoreResult};
