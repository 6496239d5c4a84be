//! Canonical record types for graph results.
//!
//! All decoding of store values happens here, once, with an explicit
//! default policy per field. Query code and route handlers only ever see
//! these types; the driver's node/relationship objects do not leak past
//! this module.

use neo4rs::{Node, Relation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A Person node as returned by the facade.
///
/// `id` is never empty: when the store returns a node without one, a
/// placeholder is synthesized so the response contract stays stable.
#[derive(Debug, Clone, Serialize)]
pub struct PersonRecord {
    pub id: String,
    pub name: Option<String>,
    pub birth_year: Option<i64>,
    pub death_year: Option<i64>,
    pub occupation: Option<Vec<String>>,
    pub specialty: Option<Vec<String>>,
    pub hobby: Option<Vec<String>>,
    pub achievement: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub frequency: Option<i64>,
    pub degree: Option<i64>,
    pub description: Option<String>,
    pub source_type: Option<String>,
    pub created_by: Option<String>,
    pub is_verified: bool,
    pub created_at: Option<String>,
}

impl PersonRecord {
    /// Decode a `(:Person)` node, synthesizing an id when absent.
    ///
    /// `index` is the position of the row in the result set, used only to
    /// keep synthesized placeholders distinct within one response.
    pub fn from_node(node: &Node, index: usize) -> Self {
        let name: Option<String> = node.get("name").ok();
        let id = node
            .get::<String>("id")
            .ok()
            .unwrap_or_else(|| synthesize_person_id(name.as_deref(), index));

        Self {
            id,
            name,
            birth_year: node.get("birth_year").ok(),
            death_year: node.get("death_year").ok(),
            occupation: string_list(node, "occupation"),
            specialty: string_list(node, "specialty"),
            hobby: string_list(node, "hobby"),
            achievement: node.get("achievement").ok(),
            kind: node.get("type").ok(),
            frequency: node.get("frequency").ok(),
            degree: node.get("degree").ok(),
            description: node.get("description").ok(),
            source_type: node.get("source_type").ok(),
            created_by: node.get("created_by").ok(),
            is_verified: node.get("is_verified").ok().unwrap_or(false),
            created_at: node.get("created_at").ok(),
        }
    }
}

/// Legacy nodes sometimes carry a bare string where newer ones carry a
/// list; both decode to a list here.
fn string_list(node: &Node, key: &str) -> Option<Vec<String>> {
    if let Ok(list) = node.get::<Vec<String>>(key) {
        return Some(list);
    }
    node.get::<String>(key).ok().map(|s| vec![s])
}

/// A directed relationship between two Person ids.
///
/// Endpoint ids are kept as the store returned them; the response shapers
/// decide whether to synthesize placeholders (generic shape) or drop the
/// edge (optimized shape). `rel_type` falls back to the structural
/// relationship type and finally to `RELATED_TO`.
#[derive(Debug, Clone, Serialize)]
pub struct RelationshipRecord {
    pub id: String,
    pub source_id: Option<String>,
    pub target_id: Option<String>,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub description: Option<String>,
    pub strength: i64,
    pub source_type: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<String>,
}

impl RelationshipRecord {
    /// Decode a relationship together with the endpoint ids its row carried.
    pub fn from_relation(
        rel: &Relation,
        source_id: Option<String>,
        target_id: Option<String>,
    ) -> Self {
        let rel_type = rel
            .get::<String>("type")
            .ok()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| {
                let structural = rel.typ().to_string();
                if structural.is_empty() {
                    "RELATED_TO".to_string()
                } else {
                    structural
                }
            });

        Self {
            id: rel
                .get::<String>("id")
                .ok()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            source_id,
            target_id,
            rel_type,
            description: rel.get("description").ok(),
            strength: rel.get("strength").ok().unwrap_or(1),
            source_type: rel.get("source_type").ok(),
            created_by: rel.get("created_by").ok(),
            created_at: rel.get("created_at").ok(),
        }
    }
}

/// One neighbor reached through a `RELATED_TO` traversal.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionRecord {
    pub target_id: Option<String>,
    pub strength: Option<i64>,
    pub description: Option<String>,
}

/// Input for creating a Person node.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub birth_year: Option<i64>,
    pub death_year: Option<i64>,
    pub occupation: Option<Vec<String>>,
    pub specialty: Option<Vec<String>>,
    pub hobby: Option<Vec<String>>,
    pub achievement: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub frequency: Option<i64>,
    pub degree: Option<i64>,
    pub description: Option<String>,
    #[serde(default = "default_source_type")]
    pub source_type: String,
    #[serde(default)]
    pub is_verified: bool,
}

fn default_source_type() -> String {
    "user_created".to_string()
}

/// Sparse update for a Person node: only present fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonPatch {
    pub name: Option<String>,
    pub birth_year: Option<i64>,
    pub death_year: Option<i64>,
    pub occupation: Option<Vec<String>>,
    pub specialty: Option<Vec<String>>,
    pub hobby: Option<Vec<String>>,
    pub achievement: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub frequency: Option<i64>,
    pub degree: Option<i64>,
    pub description: Option<String>,
    pub is_verified: Option<bool>,
}

impl PersonPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.birth_year.is_none()
            && self.death_year.is_none()
            && self.occupation.is_none()
            && self.specialty.is_none()
            && self.hobby.is_none()
            && self.achievement.is_none()
            && self.kind.is_none()
            && self.frequency.is_none()
            && self.degree.is_none()
            && self.description.is_none()
            && self.is_verified.is_none()
    }
}

fn short_uuid() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Placeholder id for a node that came back without one.
pub fn synthesize_person_id(name: Option<&str>, index: usize) -> String {
    match name {
        Some(name) if !name.trim().is_empty() => {
            let slug = name.trim().to_lowercase().replace(' ', "-");
            format!("{}-{}", slug, short_uuid())
        }
        _ => format!("node-{}-{}", index, short_uuid()),
    }
}

/// Placeholder id for a null relationship endpoint.
pub fn synthesize_endpoint_id(side: &str, index: usize) -> String {
    format!("{}-{}-{}", side, index, short_uuid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_person_id_uses_name_slug() {
        let id = synthesize_person_id(Some("Ada Lovelace"), 0);
        assert!(id.starts_with("ada-lovelace-"));
        assert_eq!(id.len(), "ada-lovelace-".len() + 8);
    }

    #[test]
    fn test_synthesized_person_id_without_name() {
        let id = synthesize_person_id(None, 3);
        assert!(id.starts_with("node-3-"));

        let blank = synthesize_person_id(Some("  "), 7);
        assert!(blank.starts_with("node-7-"));
    }

    #[test]
    fn test_synthesized_endpoint_ids_are_distinct() {
        let a = synthesize_endpoint_id("source", 1);
        let b = synthesize_endpoint_id("source", 1);
        assert!(a.starts_with("source-1-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_patch_is_empty() {
        let patch = PersonPatch::default();
        assert!(patch.is_empty());

        let patch = PersonPatch {
            name: Some("Ada".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_new_person_defaults() {
        let new: NewPerson = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(new.source_type, "user_created");
        assert!(!new.is_verified);
        assert!(new.occupation.is_none());
    }

    #[test]
    fn test_patch_type_field_rename() {
        let patch: PersonPatch = serde_json::from_str(r#"{"type": "scientist"}"#).unwrap();
        assert_eq!(patch.kind.as_deref(), Some("scientist"));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_person_record_serializes_kind_as_type() {
        let record = PersonRecord {
            id: "p-1".to_string(),
            name: Some("Ada".to_string()),
            birth_year: None,
            death_year: None,
            occupation: None,
            specialty: None,
            hobby: None,
            achievement: None,
            kind: Some("scientist".to_string()),
            frequency: None,
            degree: None,
            description: None,
            source_type: None,
            created_by: None,
            is_verified: false,
            created_at: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "scientist");
        assert!(json.get("kind").is_none());
    }
}
