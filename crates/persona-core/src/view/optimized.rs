//! Optimized graph shape: a lossy projection for direct frontend use.

use persona_graph::record::{PersonRecord, RelationshipRecord};
use serde::Serialize;

/// A Person node flattened for the visualization client.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedPersonNode {
    pub id: String,
    pub name: String,
    pub birth_year: Option<i64>,
    pub death_year: Option<i64>,
    /// First element of `specialty`.
    pub industry: Option<String>,
    /// First element of `occupation`.
    pub occupation: Option<String>,
    pub achievement: Option<String>,
    pub description: Option<String>,
    pub source_type: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Human-readable year range, when any year is known.
    pub years: Option<String>,
    pub created_by: Option<String>,
    pub is_verified: bool,
    pub created_at: Option<String>,
}

impl OptimizedPersonNode {
    pub fn from_record(record: PersonRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.unwrap_or_else(|| "unknown".to_string()),
            birth_year: record.birth_year,
            death_year: record.death_year,
            industry: first_element(record.specialty),
            occupation: first_element(record.occupation),
            achievement: record.achievement,
            description: record.description,
            source_type: record.source_type.unwrap_or_else(|| "system".to_string()),
            kind: record.kind,
            years: format_years(record.birth_year, record.death_year),
            created_by: record.created_by,
            is_verified: record.is_verified,
            created_at: record.created_at,
        }
    }
}

/// An edge flattened for the visualization client.
///
/// Edges with a missing endpoint id carry nothing the client can anchor,
/// so they are dropped instead of getting placeholder endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedGraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub strength: i64,
    pub description: Option<String>,
}

impl OptimizedGraphEdge {
    pub fn from_record(record: &RelationshipRecord) -> Option<Self> {
        let source = record.source_id.clone()?;
        let target = record.target_id.clone()?;

        Some(Self {
            id: record.id.clone(),
            source,
            target,
            label: record.rel_type.clone(),
            strength: record.strength,
            description: record.description.clone(),
        })
    }
}

/// Complete optimized graph response.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedGraphData {
    pub nodes: Vec<OptimizedPersonNode>,
    pub edges: Vec<OptimizedGraphEdge>,
}

impl OptimizedGraphData {
    pub fn from_records(persons: Vec<PersonRecord>, edges: Vec<RelationshipRecord>) -> Self {
        Self {
            nodes: persons
                .into_iter()
                .map(OptimizedPersonNode::from_record)
                .collect(),
            edges: edges
                .iter()
                .filter_map(OptimizedGraphEdge::from_record)
                .collect(),
        }
    }
}

fn first_element(values: Option<Vec<String>>) -> Option<String> {
    values.and_then(|v| v.into_iter().next())
}

fn format_years(birth: Option<i64>, death: Option<i64>) -> Option<String> {
    match (birth, death) {
        (Some(birth), Some(death)) => Some(format!("{}-{}", birth, death)),
        (Some(birth), None) => Some(format!("{}-present", birth)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> PersonRecord {
        PersonRecord {
            id: "p-1".to_string(),
            name: Some("Ada Lovelace".to_string()),
            birth_year: Some(1815),
            death_year: Some(1852),
            occupation: Some(vec!["Mathematician".to_string(), "Writer".to_string()]),
            specialty: Some(vec!["Computing".to_string()]),
            hobby: None,
            achievement: None,
            kind: None,
            frequency: None,
            degree: None,
            description: None,
            source_type: None,
            created_by: None,
            is_verified: false,
            created_at: None,
        }
    }

    fn relationship(source: Option<&str>, target: Option<&str>) -> RelationshipRecord {
        RelationshipRecord {
            id: "r-1".to_string(),
            source_id: source.map(str::to_string),
            target_id: target.map(str::to_string),
            rel_type: "RELATED_TO".to_string(),
            description: Some("mentor".to_string()),
            strength: 5,
            source_type: None,
            created_by: None,
            created_at: None,
        }
    }

    #[test]
    fn test_industry_and_occupation_take_first_element() {
        let node = OptimizedPersonNode::from_record(person());
        assert_eq!(node.industry.as_deref(), Some("Computing"));
        assert_eq!(node.occupation.as_deref(), Some("Mathematician"));
    }

    #[test]
    fn test_years_formatting() {
        let node = OptimizedPersonNode::from_record(person());
        assert_eq!(node.years.as_deref(), Some("1815-1852"));

        let mut living = person();
        living.death_year = None;
        let node = OptimizedPersonNode::from_record(living);
        assert_eq!(node.years.as_deref(), Some("1815-present"));

        let mut unknown = person();
        unknown.birth_year = None;
        unknown.death_year = None;
        let node = OptimizedPersonNode::from_record(unknown);
        assert_eq!(node.years, None);
    }

    #[test]
    fn test_source_type_defaults_to_system() {
        let node = OptimizedPersonNode::from_record(person());
        assert_eq!(node.source_type, "system");
    }

    #[test]
    fn test_edges_with_missing_endpoints_are_dropped() {
        assert!(OptimizedGraphEdge::from_record(&relationship(None, Some("b"))).is_none());
        assert!(OptimizedGraphEdge::from_record(&relationship(Some("a"), None)).is_none());

        let edge = OptimizedGraphEdge::from_record(&relationship(Some("a"), Some("b"))).unwrap();
        assert_eq!(edge.source, "a");
        assert_eq!(edge.strength, 5);
    }

    #[test]
    fn test_graph_data_drops_incomplete_edges_only() {
        let data = OptimizedGraphData::from_records(
            vec![person()],
            vec![relationship(Some("a"), Some("b")), relationship(None, None)],
        );
        assert_eq!(data.nodes.len(), 1);
        assert_eq!(data.edges.len(), 1);
    }
}
