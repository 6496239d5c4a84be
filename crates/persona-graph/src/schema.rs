//! Neo4j schema initialization (constraints and indexes).

use neo4rs::Query;
use tracing::info;

use crate::client::GraphClient;
use crate::error::GraphResult;

/// Cypher statements for schema initialization.
const SCHEMA_STATEMENTS: &[&str] = &[
    // Uniqueness constraints
    "CREATE CONSTRAINT person_id IF NOT EXISTS FOR (p:Person) REQUIRE p.id IS UNIQUE",
    // Lookup indexes
    "CREATE INDEX person_name IF NOT EXISTS FOR (p:Person) ON (p.name)",
    "CREATE INDEX person_source_type IF NOT EXISTS FOR (p:Person) ON (p.source_type)",
];

/// Initialize Neo4j schema with constraints and indexes.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> GraphResult<()> {
    info!("Initializing Neo4j schema...");

    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
