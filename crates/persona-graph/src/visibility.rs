//! Visibility policy for graph reads.
//!
//! Anonymous callers only see nodes and relationships whose `source_type`
//! is `system` or `public`. A record with no `source_type` at all counts as
//! public; whether unset should instead default-deny is an open product
//! question, so the permissive reading is kept deliberately explicit here.
//! Authenticated callers see the whole graph, user-contributed data
//! included.

/// Caller classification for graph reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Anonymous caller: system/public/unset records only.
    Public,
    /// Authenticated caller: no filtering.
    Full,
}

impl Visibility {
    pub fn for_caller(authenticated: bool) -> Self {
        if authenticated {
            Visibility::Full
        } else {
            Visibility::Public
        }
    }

    pub fn is_public(self) -> bool {
        matches!(self, Visibility::Public)
    }

    /// The allow-list predicate for a single node or relationship alias.
    pub fn filter(alias: &str) -> String {
        format!(
            "({alias}.source_type IN ['system', 'public'] OR {alias}.source_type IS NULL)"
        )
    }

    /// Predicate over a directed relationship pattern `(a)-[r]->(b)`:
    /// both endpoints and the relationship itself must be visible.
    pub fn edge_filter(source: &str, rel: &str, target: &str) -> String {
        format!(
            "{} AND {} AND {}",
            Self::filter(source),
            Self::filter(target),
            Self::filter(rel)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_caller() {
        assert_eq!(Visibility::for_caller(true), Visibility::Full);
        assert_eq!(Visibility::for_caller(false), Visibility::Public);
    }

    #[test]
    fn test_node_filter_admits_system_public_and_unset() {
        let clause = Visibility::filter("p");
        assert!(clause.contains("p.source_type IN ['system', 'public']"));
        assert!(clause.contains("p.source_type IS NULL"));
        // user_created is only reachable through the IN list, which does not name it
        assert!(!clause.contains("user_created"));
    }

    #[test]
    fn test_edge_filter_covers_both_endpoints_and_relationship() {
        let clause = Visibility::edge_filter("a", "r", "b");
        assert!(clause.contains("a.source_type"));
        assert!(clause.contains("b.source_type"));
        assert!(clause.contains("r.source_type"));
        // each leg parenthesized so the disjunctions cannot leak across AND
        assert_eq!(clause.matches('(').count(), 3);
    }
}
