//! # Persona Graph
//!
//! Neo4j access layer for the Person knowledge graph.
//!
//! Provides a dependency-injected client, visibility filtering for
//! anonymous callers, and a query facade that normalizes store records
//! into one canonical shape per entity.

pub mod client;
pub mod error;
pub mod person;
pub mod record;
pub mod schema;
pub mod visibility;

pub use client::{GraphClient, GraphConfig};
pub use error::{GraphError, GraphResult};
pub use record::{ConnectionRecord, NewPerson, PersonPatch, PersonRecord, RelationshipRecord};
pub use visibility::Visibility;
