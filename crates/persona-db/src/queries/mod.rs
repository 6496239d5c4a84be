//! Database queries.

pub mod users;
