//! Graph route handlers.
//!
//! The `network*` and `connections` endpoints allow anonymous access; the
//! visibility policy decides what an anonymous caller gets to see. The
//! remaining endpoints require authentication and read the full graph.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use persona_core::view::{
    GraphData, GraphEdge, GraphNode, OptimizedGraphData, OptimizedPersonNode,
};
use persona_graph::person;
use persona_graph::{ConnectionRecord, Visibility};

use crate::error::ApiError;
use crate::extract::{AuthUser, MaybeUser};
use crate::routes::{default_limit, Pagination};
use crate::state::AppState;

/// Independent node and edge pagination for the network endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NetworkPagination {
    #[serde(default)]
    pub skip_nodes: i64,
    #[serde(default = "default_limit")]
    pub limit_nodes: i64,
    #[serde(default)]
    pub skip_edges: i64,
    #[serde(default = "default_limit")]
    pub limit_edges: i64,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct ConnectionsResponse {
    pub connections: Vec<ConnectionRecord>,
}

pub async fn nodes(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<GraphNode>>, ApiError> {
    let records =
        person::list_persons(&state.graph, page.skip, page.limit, Visibility::Full).await?;
    Ok(Json(records.into_iter().map(GraphNode::from_record).collect()))
}

pub async fn edges(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<GraphEdge>>, ApiError> {
    let records =
        person::list_relationships(&state.graph, page.skip, page.limit, Visibility::Full).await?;
    Ok(Json(
        records
            .iter()
            .enumerate()
            .map(|(i, record)| GraphEdge::from_record(record, i))
            .collect(),
    ))
}

pub async fn network(
    caller: MaybeUser,
    State(state): State<AppState>,
    Query(page): Query<NetworkPagination>,
) -> Result<Json<GraphData>, ApiError> {
    let vis = Visibility::for_caller(caller.is_authenticated());

    let persons =
        person::list_persons(&state.graph, page.skip_nodes, page.limit_nodes, vis).await?;
    let edges =
        person::list_relationships(&state.graph, page.skip_edges, page.limit_edges, vis).await?;

    Ok(Json(GraphData::from_records(persons, edges)))
}

pub async fn network_optimized(
    caller: MaybeUser,
    State(state): State<AppState>,
    Query(page): Query<NetworkPagination>,
) -> Result<Json<OptimizedGraphData>, ApiError> {
    let vis = Visibility::for_caller(caller.is_authenticated());

    let persons =
        person::list_persons(&state.graph, page.skip_nodes, page.limit_nodes, vis).await?;
    let edges =
        person::list_relationships(&state.graph, page.skip_edges, page.limit_edges, vis).await?;

    Ok(Json(OptimizedGraphData::from_records(persons, edges)))
}

pub async fn search(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<GraphNode>>, ApiError> {
    let records = person::search_persons(&state.graph, &params.q).await?;
    Ok(Json(records.into_iter().map(GraphNode::from_record).collect()))
}

pub async fn search_optimized(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<OptimizedPersonNode>>, ApiError> {
    let records = person::search_persons(&state.graph, &params.q).await?;
    Ok(Json(
        records
            .into_iter()
            .map(OptimizedPersonNode::from_record)
            .collect(),
    ))
}

pub async fn connections(
    caller: MaybeUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConnectionsResponse>, ApiError> {
    let vis = Visibility::for_caller(caller.is_authenticated());
    let connections = person::connections(&state.graph, &id, vis).await?;
    Ok(Json(ConnectionsResponse { connections }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_pagination_defaults() {
        let page: NetworkPagination = serde_json::from_str("{}").unwrap();
        assert_eq!(page.skip_nodes, 0);
        assert_eq!(page.limit_nodes, 100);
        assert_eq!(page.skip_edges, 0);
        assert_eq!(page.limit_edges, 100);
    }
}
