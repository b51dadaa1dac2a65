//! Record types returned by the two stores

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Document field holding the unique protein identifier
pub const FIELD_ENTRY: &str = "Entry";
/// Document field holding the InterPro annotation
pub const FIELD_INTERPRO: &str = "InterPro";
/// Document field holding `;`-separated EC codes
pub const FIELD_EC_NUMBER: &str = "EC number";
/// Document field holding the amino-acid sequence
pub const FIELD_SEQUENCE: &str = "Sequence";

/// Rendered in place of a graph attribute the node does not carry
pub const MISSING_ATTRIBUTE: &str = "N/A";

/// A protein document as stored in the document store.
///
/// Semi-structured: the four well-known fields are exposed through accessors,
/// everything else the document carries is kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProteinRecord(Map<String, Value>);

impl ProteinRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        ProteinRecord(fields)
    }

    pub fn entry(&self) -> Option<&str> {
        self.str_field(FIELD_ENTRY)
    }

    pub fn interpro(&self) -> Option<&str> {
        self.str_field(FIELD_INTERPRO)
    }

    pub fn ec_number(&self) -> Option<&str> {
        self.str_field(FIELD_EC_NUMBER)
    }

    pub fn sequence(&self) -> Option<&str> {
        self.str_field(FIELD_SEQUENCE)
    }

    /// Raw access to any field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }
}

impl TryFrom<Value> for ProteinRecord {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(ProteinRecord(map)),
            other => Err(other),
        }
    }
}

/// A protein node as listed by a graph search.
///
/// Attributes the node lacks are filled with [`MISSING_ATTRIBUTE`] so the
/// listing never carries nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphProtein {
    #[serde(rename = "Entry")]
    pub entry: String,
    #[serde(rename = "InterPro")]
    pub interpro: String,
    #[serde(rename = "ECNumber")]
    pub ec_number: String,
}

impl GraphProtein {
    pub fn from_optional(
        entry: Option<String>,
        interpro: Option<String>,
        ec_number: Option<String>,
    ) -> Self {
        let or_missing = |v: Option<String>| v.unwrap_or_else(|| MISSING_ATTRIBUTE.to_string());
        Self {
            entry: or_missing(entry),
            interpro: or_missing(interpro),
            ec_number: or_missing(ec_number),
        }
    }
}

/// A protein node as held by the graph store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinNode {
    pub id: String,
    #[serde(default)]
    pub interpro: Option<String>,
    #[serde(default)]
    pub ec_number: Option<String>,
}

impl ProteinNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            interpro: None,
            ec_number: None,
        }
    }

    pub fn with_interpro(mut self, interpro: impl Into<String>) -> Self {
        self.interpro = Some(interpro.into());
        self
    }

    pub fn with_ec_number(mut self, ec_number: impl Into<String>) -> Self {
        self.ec_number = Some(ec_number.into());
        self
    }
}

/// A domain-similarity relationship, oriented as the store returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub source: String,
    pub target: String,
    /// Absent when the relationship carries no `weight` property
    #[serde(default)]
    pub weight: Option<f64>,
}

impl SimilarityEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: Some(weight),
        }
    }

    /// The endpoint opposite `protein_id`, if the edge touches it
    pub fn other_end(&self, protein_id: &str) -> Option<&str> {
        if self.source == protein_id {
            Some(&self.target)
        } else if self.target == protein_id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// A protein adjacent to the queried one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    #[serde(rename = "Neighbor")]
    pub id: String,
    #[serde(rename = "Weight")]
    pub weight: Option<f64>,
}

impl fmt::Display for Neighbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            Some(w) => write!(f, "Neighbor: {}, Weight: {}", self.id, w),
            None => write!(f, "Neighbor: {}, Weight: {}", self.id, MISSING_ATTRIBUTE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_accessors() {
        let record = ProteinRecord::try_from(json!({
            "Entry": "P1",
            "InterPro": "IPR000719;",
            "EC number": "2.7.11.1",
            "Sequence": "MKV",
            "Length": 3
        }))
        .unwrap();

        assert_eq!(record.entry(), Some("P1"));
        assert_eq!(record.interpro(), Some("IPR000719;"));
        assert_eq!(record.ec_number(), Some("2.7.11.1"));
        assert_eq!(record.sequence(), Some("MKV"));
        assert_eq!(record.get("Length"), Some(&json!(3)));
    }

    #[test]
    fn test_record_rejects_non_object() {
        assert!(ProteinRecord::try_from(json!(["P1"])).is_err());
    }

    #[test]
    fn test_graph_protein_fills_missing_attributes() {
        let protein = GraphProtein::from_optional(Some("P1".into()), None, None);
        assert_eq!(protein.interpro, "N/A");
        assert_eq!(protein.ec_number, "N/A");

        let value = serde_json::to_value(&protein).unwrap();
        assert_eq!(value, json!({"Entry": "P1", "InterPro": "N/A", "ECNumber": "N/A"}));
    }

    #[test]
    fn test_other_end() {
        let edge = SimilarityEdge::new("A", "B", 0.5);
        assert_eq!(edge.other_end("A"), Some("B"));
        assert_eq!(edge.other_end("B"), Some("A"));
        assert_eq!(edge.other_end("C"), None);
    }

    #[test]
    fn test_neighbor_display_without_weight() {
        let neighbor = Neighbor { id: "Q9".into(), weight: None };
        assert_eq!(neighbor.to_string(), "Neighbor: Q9, Weight: N/A");
    }
}
