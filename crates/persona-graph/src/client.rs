//! Neo4j connection client.

use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;

use crate::error::GraphResult;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "persona_dev".to_string(),
            database: "neo4j".to_string(),
        }
    }
}

impl GraphConfig {
    /// Read connection settings from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            uri: std::env::var("NEO4J_URI").unwrap_or(defaults.uri),
            user: std::env::var("NEO4J_USERNAME").unwrap_or(defaults.user),
            password: std::env::var("NEO4J_PASSWORD").unwrap_or(defaults.password),
            database: std::env::var("NEO4J_DATABASE").unwrap_or(defaults.database),
        }
    }
}

/// Client for Person-graph operations.
///
/// Cheap to clone; clones share the underlying connection pool. Constructed
/// once at startup and passed into handlers through application state.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// Note: neo4rs uses a lazy deadpool — `Graph::connect` only creates the
    /// pool object and does NOT establish a real bolt connection yet. We run
    /// a cheap `RETURN 1` ping immediately so that callers can wrap this in a
    /// timeout and get a fast failure when Neo4j is unreachable instead of
    /// hanging silently.
    pub async fn connect(config: &GraphConfig) -> GraphResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(16)
            .fetch_size(200)
            .build()?;

        let graph = Graph::connect(neo4j_config).await?;

        // Ping to force an actual TCP+bolt handshake so the caller's timeout works.
        graph.run(Query::new("RETURN 1".to_string())).await?;

        Ok(Self { graph })
    }

    /// Execute a Cypher query that returns no results.
    pub async fn execute(&self, query: Query) -> GraphResult<()> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> GraphResult<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}
