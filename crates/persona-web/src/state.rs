//! Application state.

use std::sync::Arc;

use persona_core::AppConfig;
use persona_db::DbPool;
use persona_graph::GraphClient;

/// Application state shared across handlers.
///
/// Both store handles are pooled and cheap to clone; no other mutable
/// state is shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub graph: GraphClient,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DbPool, graph: GraphClient, config: AppConfig) -> Self {
        Self {
            db,
            graph,
            config: Arc::new(config),
        }
    }
}
