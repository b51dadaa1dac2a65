//! Parameterized Cypher for the protein graph
//!
//! Node label and relationship type are configurable, so statements are
//! rendered per [`CypherQueries`] instance; every user-supplied value travels
//! as a parameter. A null parameter disables its predicate
//! (`$p IS NULL OR ...`).

use neo4rs::{query, Query};

use crate::model::ProteinFilter;

pub const DEFAULT_NODE_LABEL: &str = "Protein1";
pub const DEFAULT_RELATIONSHIP_TYPE: &str = "DOMAIN_SIMILARITY";

/// Statement factory bound to one label / relationship type pair
#[derive(Debug, Clone)]
pub struct CypherQueries {
    node_label: String,
    relationship_type: String,
}

impl Default for CypherQueries {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_LABEL, DEFAULT_RELATIONSHIP_TYPE)
    }
}

/// Whether `name` can be spliced into a statement as a label or type
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl CypherQueries {
    /// Callers validate both names with [`is_valid_identifier`] first
    pub fn new(node_label: impl Into<String>, relationship_type: impl Into<String>) -> Self {
        Self {
            node_label: node_label.into(),
            relationship_type: relationship_type.into(),
        }
    }

    pub fn search_text(&self) -> String {
        format!(
            "MATCH (p:{label})
             WHERE ($entry IS NULL OR p.id = $entry)
               AND ($interpro IS NULL OR toLower(coalesce(p.interpro, '')) CONTAINS toLower($interpro))
               AND ($ec_number IS NULL OR toLower(coalesce(p.ec_number, '')) CONTAINS toLower($ec_number))
             RETURN p.id AS Entry, p.interpro AS InterPro, p.ec_number AS ECNumber",
            label = self.node_label,
        )
    }

    pub fn search(&self, filter: &ProteinFilter) -> Query {
        query(&self.search_text())
            .param("entry", filter.entry.clone())
            .param("interpro", filter.interpro.clone())
            .param("ec_number", filter.ec_number.clone())
    }

    pub fn neighbors_text(&self) -> String {
        format!(
            "MATCH (p:{label} {{id: $entry}})-[r:{rel}]-(neighbor:{label})
             RETURN neighbor.id AS NeighborID, r.weight AS Weight",
            label = self.node_label,
            rel = self.relationship_type,
        )
    }

    pub fn neighbors(&self, protein_id: &str) -> Query {
        query(&self.neighbors_text()).param("entry", protein_id)
    }

    pub fn edges_for_text(&self) -> String {
        format!(
            "MATCH (p:{label} {{id: $entry}})-[r:{rel}]-(neighbor:{label})
             RETURN p.id AS Source, neighbor.id AS Target, r.weight AS Weight",
            label = self.node_label,
            rel = self.relationship_type,
        )
    }

    pub fn edges_for(&self, protein_id: &str) -> Query {
        query(&self.edges_for_text()).param("entry", protein_id)
    }

    /// Directed match so each relationship is returned once
    pub fn sample_edges_text(&self) -> String {
        format!(
            "MATCH (:{label})-[r:{rel}]->(:{label})
             RETURN startNode(r).id AS Source, endNode(r).id AS Target, r.weight AS Weight
             LIMIT $limit",
            label = self.node_label,
            rel = self.relationship_type,
        )
    }

    pub fn sample_edges(&self, limit: i64) -> Query {
        query(&self.sample_edges_text()).param("limit", limit)
    }

    /// Category labels must stay in sync with `EcCategory::label`
    pub fn ec_categories_text(&self) -> String {
        format!(
            "MATCH (p:{label})
             WITH CASE
                 WHEN p.ec_number IS NULL THEN 'No EC number'
                 WHEN size(split(p.ec_number, ';')) = 1 THEN 'One EC number'
                 ELSE 'Multiple EC numbers'
             END AS ec_category
             RETURN ec_category, count(*) AS count",
            label = self.node_label,
        )
    }

    pub fn ec_categories(&self) -> Query {
        query(&self.ec_categories_text())
    }

    pub fn counts(&self) -> Query {
        query(&format!(
            "MATCH (p:{label})
             OPTIONAL MATCH (p)-[r:{rel}]->(:{label})
             RETURN count(DISTINCT p) AS nodes, count(r) AS edges",
            label = self.node_label,
            rel = self.relationship_type,
        ))
    }

    pub fn ping(&self) -> Query {
        query("RETURN 1 AS ok")
    }
}
