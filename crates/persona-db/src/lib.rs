//! Persona Database Layer
//!
//! SQLite-backed store for user accounts. The graph side of the system
//! lives in persona-graph; this crate only knows about the relational
//! `users` table and its weak back-reference into the graph.

pub mod migrations;
pub mod pool;
pub mod queries;

pub use pool::{DbError, DbPool, DbResult};
