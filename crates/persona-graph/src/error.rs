//! Graph-layer error types.

use thiserror::Error;

/// Errors surfaced by the graph access layer.
///
/// Store failures are passed through with the driver's message attached;
/// no retry is attempted and no distinction is made between transient and
/// permanent failures.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Graph store error: {0}")]
    Store(#[from] neo4rs::Error),

    #[error("No fields to update")]
    EmptyUpdate,
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
