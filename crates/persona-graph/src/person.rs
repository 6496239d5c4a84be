//! Query facade for the Person graph.
//!
//! Each operation issues exactly one parameterized Cypher query and decodes
//! the rows through [`crate::record`]. Pagination is store-side SKIP/LIMIT;
//! no ordering is requested, so result order across pages is not stable
//! under concurrent writes.

use chrono::Utc;
use neo4rs::{Node, Query, Relation};
use uuid::Uuid;

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};
use crate::record::{ConnectionRecord, NewPerson, PersonPatch, PersonRecord, RelationshipRecord};
use crate::visibility::Visibility;

/// Fixed cap on neighbor lookups.
const CONNECTIONS_LIMIT: i64 = 10;

/// Fixed cap on search results.
const SEARCH_LIMIT: i64 = 50;

pub(crate) fn list_nodes_cypher(vis: Visibility) -> String {
    if vis.is_public() {
        format!(
            "MATCH (p:Person)
             WHERE {}
             RETURN p
             SKIP $skip
             LIMIT $limit",
            Visibility::filter("p")
        )
    } else {
        "MATCH (p:Person)
         RETURN p
         SKIP $skip
         LIMIT $limit"
            .to_string()
    }
}

pub(crate) fn list_edges_cypher(vis: Visibility) -> String {
    if vis.is_public() {
        format!(
            "MATCH (a:Person)-[r]->(b:Person)
             WHERE {}
             RETURN a.id as source_id, b.id as target_id, r
             SKIP $skip
             LIMIT $limit",
            Visibility::edge_filter("a", "r", "b")
        )
    } else {
        "MATCH (a:Person)-[r]->(b:Person)
         RETURN a.id as source_id, b.id as target_id, r
         SKIP $skip
         LIMIT $limit"
            .to_string()
    }
}

/// Neighbor traversal is deliberately narrower than edge listing: only the
/// `RELATED_TO` label is followed, so relationships of other types never
/// show up here even though `list_relationships` enumerates them.
pub(crate) fn connections_cypher(vis: Visibility) -> String {
    if vis.is_public() {
        format!(
            "MATCH (p:Person {{id: $node_id}})-[r:RELATED_TO]-(other:Person)
             WHERE {} AND {}
             RETURN other.id as target_id, r.strength as strength, r.description as description
             LIMIT $limit",
            Visibility::filter("p"),
            Visibility::filter("other")
        )
    } else {
        "MATCH (p:Person {id: $node_id})-[r:RELATED_TO]-(other:Person)
         RETURN other.id as target_id, r.strength as strength, r.description as description
         LIMIT $limit"
            .to_string()
    }
}

/// Substring search across the scalar text fields and the FIRST element of
/// each array-valued field. Elements past the first are not searched.
pub(crate) const SEARCH_CYPHER: &str = "MATCH (p:Person)
     WHERE toLower(p.name) CONTAINS toLower($query)
        OR toLower(p.occupation[0]) CONTAINS toLower($query)
        OR toLower(p.specialty[0]) CONTAINS toLower($query)
        OR toLower(p.hobby[0]) CONTAINS toLower($query)
        OR toLower(p.achievement) CONTAINS toLower($query)
        OR toLower(p.description) CONTAINS toLower($query)
        OR toLower(p.type) CONTAINS toLower($query)
     RETURN p
     LIMIT $limit";

const GET_CYPHER: &str = "MATCH (p:Person {id: $id}) RETURN p";

/// The SET fragments a patch will write, in a fixed order.
pub(crate) fn update_fields(patch: &PersonPatch) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if patch.name.is_some() {
        fields.push("p.name = $name");
    }
    if patch.birth_year.is_some() {
        fields.push("p.birth_year = $birth_year");
    }
    if patch.death_year.is_some() {
        fields.push("p.death_year = $death_year");
    }
    if patch.occupation.is_some() {
        fields.push("p.occupation = $occupation");
    }
    if patch.specialty.is_some() {
        fields.push("p.specialty = $specialty");
    }
    if patch.hobby.is_some() {
        fields.push("p.hobby = $hobby");
    }
    if patch.achievement.is_some() {
        fields.push("p.achievement = $achievement");
    }
    if patch.kind.is_some() {
        fields.push("p.type = $type");
    }
    if patch.frequency.is_some() {
        fields.push("p.frequency = $frequency");
    }
    if patch.degree.is_some() {
        fields.push("p.degree = $degree");
    }
    if patch.description.is_some() {
        fields.push("p.description = $description");
    }
    if patch.is_verified.is_some() {
        fields.push("p.is_verified = $is_verified");
    }
    fields
}

/// Build the sparse-update query. Fails before touching the store when the
/// patch carries no recognized fields.
pub(crate) fn build_update(id: &str, patch: &PersonPatch) -> GraphResult<Query> {
    let fields = update_fields(patch);
    if fields.is_empty() {
        return Err(GraphError::EmptyUpdate);
    }

    let cypher = format!(
        "MATCH (p:Person {{id: $id}})
         SET {}
         RETURN p",
        fields.join(", ")
    );

    let mut query = Query::new(cypher).param("id", id);
    if let Some(ref name) = patch.name {
        query = query.param("name", name.as_str());
    }
    if let Some(birth_year) = patch.birth_year {
        query = query.param("birth_year", birth_year);
    }
    if let Some(death_year) = patch.death_year {
        query = query.param("death_year", death_year);
    }
    if let Some(ref occupation) = patch.occupation {
        query = query.param("occupation", occupation.clone());
    }
    if let Some(ref specialty) = patch.specialty {
        query = query.param("specialty", specialty.clone());
    }
    if let Some(ref hobby) = patch.hobby {
        query = query.param("hobby", hobby.clone());
    }
    if let Some(ref achievement) = patch.achievement {
        query = query.param("achievement", achievement.as_str());
    }
    if let Some(ref kind) = patch.kind {
        query = query.param("type", kind.as_str());
    }
    if let Some(frequency) = patch.frequency {
        query = query.param("frequency", frequency);
    }
    if let Some(degree) = patch.degree {
        query = query.param("degree", degree);
    }
    if let Some(ref description) = patch.description {
        query = query.param("description", description.as_str());
    }
    if let Some(is_verified) = patch.is_verified {
        query = query.param("is_verified", is_verified);
    }

    Ok(query)
}

/// Optional property fragments present on a create request.
pub(crate) fn create_fields(new: &NewPerson) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if new.birth_year.is_some() {
        fields.push("birth_year: $birth_year");
    }
    if new.death_year.is_some() {
        fields.push("death_year: $death_year");
    }
    if new.occupation.is_some() {
        fields.push("occupation: $occupation");
    }
    if new.specialty.is_some() {
        fields.push("specialty: $specialty");
    }
    if new.hobby.is_some() {
        fields.push("hobby: $hobby");
    }
    if new.achievement.is_some() {
        fields.push("achievement: $achievement");
    }
    if new.kind.is_some() {
        fields.push("type: $type");
    }
    if new.frequency.is_some() {
        fields.push("frequency: $frequency");
    }
    if new.degree.is_some() {
        fields.push("degree: $degree");
    }
    if new.description.is_some() {
        fields.push("description: $description");
    }
    fields
}

fn build_create(id: &str, new: &NewPerson, created_by: &str, created_at: &str) -> Query {
    let mut props = vec![
        "id: $id",
        "name: $name",
        "source_type: $source_type",
        "created_by: $created_by",
        "is_verified: $is_verified",
        "created_at: $created_at",
    ];
    props.extend(create_fields(new));

    let cypher = format!("CREATE (p:Person {{{}}}) RETURN p", props.join(", "));

    let mut query = Query::new(cypher)
        .param("id", id)
        .param("name", new.name.as_str())
        .param("source_type", new.source_type.as_str())
        .param("created_by", created_by)
        .param("is_verified", new.is_verified)
        .param("created_at", created_at);

    if let Some(birth_year) = new.birth_year {
        query = query.param("birth_year", birth_year);
    }
    if let Some(death_year) = new.death_year {
        query = query.param("death_year", death_year);
    }
    if let Some(ref occupation) = new.occupation {
        query = query.param("occupation", occupation.clone());
    }
    if let Some(ref specialty) = new.specialty {
        query = query.param("specialty", specialty.clone());
    }
    if let Some(ref hobby) = new.hobby {
        query = query.param("hobby", hobby.clone());
    }
    if let Some(ref achievement) = new.achievement {
        query = query.param("achievement", achievement.as_str());
    }
    if let Some(ref kind) = new.kind {
        query = query.param("type", kind.as_str());
    }
    if let Some(frequency) = new.frequency {
        query = query.param("frequency", frequency);
    }
    if let Some(degree) = new.degree {
        query = query.param("degree", degree);
    }
    if let Some(ref description) = new.description {
        query = query.param("description", description.as_str());
    }

    query
}

/// List Person nodes with store-side pagination.
pub async fn list_persons(
    client: &GraphClient,
    skip: i64,
    limit: i64,
    vis: Visibility,
) -> GraphResult<Vec<PersonRecord>> {
    let query = Query::new(list_nodes_cypher(vis))
        .param("skip", skip)
        .param("limit", limit);

    let rows = client.query(query).await?;

    let mut persons = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if let Ok(node) = row.get::<Node>("p") {
            persons.push(PersonRecord::from_node(&node, i));
        }
    }
    Ok(persons)
}

/// List directed relationships, all types included.
pub async fn list_relationships(
    client: &GraphClient,
    skip: i64,
    limit: i64,
    vis: Visibility,
) -> GraphResult<Vec<RelationshipRecord>> {
    let query = Query::new(list_edges_cypher(vis))
        .param("skip", skip)
        .param("limit", limit);

    let rows = client.query(query).await?;

    let mut edges = Vec::with_capacity(rows.len());
    for row in &rows {
        let rel: Relation = match row.get("r") {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let source_id: Option<String> = row.get::<Option<String>>("source_id").ok().flatten();
        let target_id: Option<String> = row.get::<Option<String>>("target_id").ok().flatten();
        edges.push(RelationshipRecord::from_relation(&rel, source_id, target_id));
    }
    Ok(edges)
}

/// Fetch one Person by id.
pub async fn get_person(client: &GraphClient, id: &str) -> GraphResult<Option<PersonRecord>> {
    let query = Query::new(GET_CYPHER.to_string()).param("id", id);
    let rows = client.query(query).await?;

    Ok(rows
        .first()
        .and_then(|row| row.get::<Node>("p").ok())
        .map(|node| PersonRecord::from_node(&node, 0)))
}

/// Create a Person node with a fresh unique id.
///
/// Names are not unique; duplicates are permitted by design.
pub async fn create_person(
    client: &GraphClient,
    new: &NewPerson,
    created_by: &str,
) -> GraphResult<PersonRecord> {
    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now().to_rfc3339();

    client
        .execute(build_create(&id, new, created_by, &created_at))
        .await?;

    Ok(PersonRecord {
        id,
        name: Some(new.name.clone()),
        birth_year: new.birth_year,
        death_year: new.death_year,
        occupation: new.occupation.clone(),
        specialty: new.specialty.clone(),
        hobby: new.hobby.clone(),
        achievement: new.achievement.clone(),
        kind: new.kind.clone(),
        frequency: new.frequency,
        degree: new.degree,
        description: new.description.clone(),
        source_type: Some(new.source_type.clone()),
        created_by: Some(created_by.to_string()),
        is_verified: new.is_verified,
        created_at: Some(created_at),
    })
}

/// Apply a sparse update; fields absent from the patch keep their values.
///
/// Returns `Ok(None)` when no node carries the id. Concurrent updates are
/// last-write-wins per field; there is no version check.
pub async fn update_person(
    client: &GraphClient,
    id: &str,
    patch: &PersonPatch,
) -> GraphResult<Option<PersonRecord>> {
    let query = build_update(id, patch)?;
    let rows = client.query(query).await?;

    Ok(rows
        .first()
        .and_then(|row| row.get::<Node>("p").ok())
        .map(|node| PersonRecord::from_node(&node, 0)))
}

/// Neighbors of a node over `RELATED_TO`, capped at ten.
pub async fn connections(
    client: &GraphClient,
    node_id: &str,
    vis: Visibility,
) -> GraphResult<Vec<ConnectionRecord>> {
    let query = Query::new(connections_cypher(vis))
        .param("node_id", node_id)
        .param("limit", CONNECTIONS_LIMIT);

    let rows = client.query(query).await?;

    Ok(rows
        .iter()
        .map(|row| ConnectionRecord {
            target_id: row.get::<Option<String>>("target_id").ok().flatten(),
            strength: row.get::<Option<i64>>("strength").ok().flatten(),
            description: row.get::<Option<String>>("description").ok().flatten(),
        })
        .collect())
}

/// Case-insensitive substring search, capped at fifty results.
pub async fn search_persons(client: &GraphClient, q: &str) -> GraphResult<Vec<PersonRecord>> {
    let query = Query::new(SEARCH_CYPHER.to_string())
        .param("query", q)
        .param("limit", SEARCH_LIMIT);

    let rows = client.query(query).await?;

    let mut persons = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        if let Ok(node) = row.get::<Node>("p") {
            persons.push(PersonRecord::from_node(&node, i));
        }
    }
    Ok(persons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_list_filters_source_type() {
        let cypher = list_nodes_cypher(Visibility::Public);
        assert!(cypher.contains("WHERE"));
        assert!(cypher.contains("p.source_type IN ['system', 'public']"));
        assert!(cypher.contains("p.source_type IS NULL"));
    }

    #[test]
    fn test_full_list_has_no_filter() {
        let cypher = list_nodes_cypher(Visibility::Full);
        assert!(!cypher.contains("WHERE"));
    }

    #[test]
    fn test_public_edges_filter_endpoints_and_relationship() {
        let cypher = list_edges_cypher(Visibility::Public);
        assert!(cypher.contains("a.source_type"));
        assert!(cypher.contains("b.source_type"));
        assert!(cypher.contains("r.source_type"));
    }

    #[test]
    fn test_full_visibility_is_superset_of_public() {
        // The authenticated query is the anonymous query minus its WHERE
        // clause, so everything visible anonymously is visible here too.
        let builders: [fn(Visibility) -> String; 3] =
            [list_nodes_cypher, list_edges_cypher, connections_cypher];
        for builder in builders {
            assert!(builder(Visibility::Public).contains("WHERE"));
            assert!(!builder(Visibility::Full).contains("WHERE"));
        }
    }

    #[test]
    fn test_connections_traverse_related_to_only() {
        for vis in [Visibility::Public, Visibility::Full] {
            let cypher = connections_cypher(vis);
            assert!(cypher.contains("[r:RELATED_TO]"));
        }
        // Edge listing carries no label restriction by contrast.
        assert!(!list_edges_cypher(Visibility::Full).contains("RELATED_TO"));
    }

    #[test]
    fn test_search_checks_first_array_element_only() {
        assert!(SEARCH_CYPHER.contains("p.occupation[0]"));
        assert!(SEARCH_CYPHER.contains("p.specialty[0]"));
        assert!(SEARCH_CYPHER.contains("p.hobby[0]"));
        assert!(!SEARCH_CYPHER.contains("occupation[1]"));
        // whole-list predicates would use ANY(...); none is present
        assert!(!SEARCH_CYPHER.contains("ANY("));
    }

    #[test]
    fn test_empty_patch_is_rejected_before_store_access() {
        let err = match build_update("some-id", &PersonPatch::default()) {
            Ok(_) => panic!("expected build_update to reject an empty patch"),
            Err(e) => e,
        };
        assert!(matches!(err, GraphError::EmptyUpdate));
    }

    #[test]
    fn test_single_field_patch_sets_only_that_field() {
        let patch = PersonPatch {
            description: Some("pioneer of computing".to_string()),
            ..Default::default()
        };
        let fields = update_fields(&patch);
        assert_eq!(fields, vec!["p.description = $description"]);
    }

    #[test]
    fn test_patch_field_order_is_stable() {
        let patch = PersonPatch {
            name: Some("Ada".to_string()),
            is_verified: Some(true),
            birth_year: Some(1815),
            ..Default::default()
        };
        let fields = update_fields(&patch);
        assert_eq!(
            fields,
            vec![
                "p.name = $name",
                "p.birth_year = $birth_year",
                "p.is_verified = $is_verified",
            ]
        );
    }

    #[test]
    fn test_create_fields_skip_absent_options() {
        let new: NewPerson = serde_json::from_str(r#"{"name": "Ada", "birth_year": 1815}"#).unwrap();
        let fields = create_fields(&new);
        assert_eq!(fields, vec!["birth_year: $birth_year"]);
    }
}
