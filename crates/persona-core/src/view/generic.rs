//! Generic graph shape: every record field preserved verbatim under a
//! nested properties structure.

use persona_graph::record::{synthesize_endpoint_id, PersonRecord, RelationshipRecord};
use serde::Serialize;

/// A node in the generic graph response.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: PersonRecord,
}

impl GraphNode {
    pub fn from_record(record: PersonRecord) -> Self {
        let label = record
            .name
            .clone()
            .unwrap_or_else(|| "unknown".to_string());

        Self {
            id: record.id.clone(),
            label,
            kind: "person".to_string(),
            properties: record,
        }
    }
}

/// Relationship fields nested under a graph edge.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeProperties {
    #[serde(rename = "type")]
    pub rel_type: String,
    pub description: Option<String>,
    pub strength: i64,
    pub source_type: String,
    pub created_by: Option<String>,
    pub created_at: Option<String>,
}

/// An edge in the generic graph response.
///
/// Source and target ids are never null: missing endpoints get synthesized
/// placeholders keyed by the row index.
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: EdgeProperties,
}

impl GraphEdge {
    pub fn from_record(record: &RelationshipRecord, index: usize) -> Self {
        Self {
            id: record.id.clone(),
            source: record
                .source_id
                .clone()
                .unwrap_or_else(|| synthesize_endpoint_id("source", index)),
            target: record
                .target_id
                .clone()
                .unwrap_or_else(|| synthesize_endpoint_id("target", index)),
            label: record.rel_type.clone(),
            kind: "relates_to".to_string(),
            properties: EdgeProperties {
                rel_type: record.rel_type.clone(),
                description: record.description.clone(),
                strength: record.strength,
                source_type: record
                    .source_type
                    .clone()
                    .unwrap_or_else(|| "user_created".to_string()),
                created_by: record.created_by.clone(),
                created_at: record.created_at.clone(),
            },
        }
    }
}

/// Complete graph response: nodes plus edges.
#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn from_records(persons: Vec<PersonRecord>, edges: Vec<RelationshipRecord>) -> Self {
        Self {
            nodes: persons.into_iter().map(GraphNode::from_record).collect(),
            edges: edges
                .iter()
                .enumerate()
                .map(|(i, record)| GraphEdge::from_record(record, i))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: Option<&str>) -> PersonRecord {
        PersonRecord {
            id: "p-1".to_string(),
            name: name.map(str::to_string),
            birth_year: Some(1815),
            death_year: Some(1852),
            occupation: Some(vec!["Mathematician".to_string()]),
            specialty: None,
            hobby: None,
            achievement: None,
            kind: Some("scientist".to_string()),
            frequency: None,
            degree: None,
            description: None,
            source_type: Some("system".to_string()),
            created_by: None,
            is_verified: true,
            created_at: None,
        }
    }

    fn relationship(source: Option<&str>, target: Option<&str>) -> RelationshipRecord {
        RelationshipRecord {
            id: "r-1".to_string(),
            source_id: source.map(str::to_string),
            target_id: target.map(str::to_string),
            rel_type: "RELATED_TO".to_string(),
            description: None,
            strength: 3,
            source_type: None,
            created_by: None,
            created_at: None,
        }
    }

    #[test]
    fn test_node_label_is_name() {
        let node = GraphNode::from_record(person(Some("Ada Lovelace")));
        assert_eq!(node.label, "Ada Lovelace");
        assert_eq!(node.kind, "person");
        assert_eq!(node.properties.birth_year, Some(1815));
    }

    #[test]
    fn test_node_label_falls_back_when_unnamed() {
        let node = GraphNode::from_record(person(None));
        assert_eq!(node.label, "unknown");
    }

    #[test]
    fn test_edge_keeps_real_endpoints() {
        let edge = GraphEdge::from_record(&relationship(Some("a"), Some("b")), 0);
        assert_eq!(edge.source, "a");
        assert_eq!(edge.target, "b");
        assert_eq!(edge.label, "RELATED_TO");
        assert_eq!(edge.properties.strength, 3);
    }

    #[test]
    fn test_edge_synthesizes_missing_endpoints() {
        let edge = GraphEdge::from_record(&relationship(None, Some("b")), 4);
        assert!(edge.source.starts_with("source-4-"));
        assert_eq!(edge.target, "b");
    }

    #[test]
    fn test_edge_source_type_defaults_to_user_created() {
        let edge = GraphEdge::from_record(&relationship(Some("a"), Some("b")), 0);
        assert_eq!(edge.properties.source_type, "user_created");
    }

    #[test]
    fn test_graph_data_shapes_all_records() {
        let data = GraphData::from_records(
            vec![person(Some("Ada"))],
            vec![relationship(Some("a"), Some("b")), relationship(None, None)],
        );
        assert_eq!(data.nodes.len(), 1);
        assert_eq!(data.edges.len(), 2);
    }
}
