//! Search filter shared by both stores
//!
//! `entry` matches exactly; `interpro` and `ec_number` match as
//! case-insensitive substrings. An absent filter matches everything.

use serde::{Deserialize, Serialize};

use super::record::{ProteinNode, ProteinRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProteinFilter {
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub interpro: Option<String>,
    #[serde(default)]
    pub ec_number: Option<String>,
}

/// Empty text inputs mean "no constraint"
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ProteinFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw form inputs, dropping empty strings
    pub fn from_inputs(
        entry: Option<String>,
        interpro: Option<String>,
        ec_number: Option<String>,
    ) -> Self {
        Self {
            entry: non_empty(entry),
            interpro: non_empty(interpro),
            ec_number: non_empty(ec_number),
        }
    }

    pub fn entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = non_empty(Some(entry.into()));
        self
    }

    pub fn interpro(mut self, interpro: impl Into<String>) -> Self {
        self.interpro = non_empty(Some(interpro.into()));
        self
    }

    pub fn ec_number(mut self, ec_number: impl Into<String>) -> Self {
        self.ec_number = non_empty(Some(ec_number.into()));
        self
    }

    /// Evaluate the filter against raw field values.
    ///
    /// A constrained field that is absent on the record never matches.
    pub fn matches(&self, entry: Option<&str>, interpro: Option<&str>, ec_number: Option<&str>) -> bool {
        let entry_ok = match &self.entry {
            Some(wanted) => entry == Some(wanted.as_str()),
            None => true,
        };
        entry_ok
            && substring_matches(self.interpro.as_deref(), interpro)
            && substring_matches(self.ec_number.as_deref(), ec_number)
    }

    pub fn matches_record(&self, record: &ProteinRecord) -> bool {
        self.matches(record.entry(), record.interpro(), record.ec_number())
    }

    pub fn matches_node(&self, node: &ProteinNode) -> bool {
        self.matches(
            Some(node.id.as_str()),
            node.interpro.as_deref(),
            node.ec_number.as_deref(),
        )
    }
}

fn substring_matches(needle: Option<&str>, haystack: Option<&str>) -> bool {
    match (needle, haystack) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(needle), Some(haystack)) => contains_ignore_case(haystack, needle),
    }
}

/// Case-insensitive literal containment
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_match_everything() {
        let filter = ProteinFilter::from_inputs(Some(String::new()), None, Some(String::new()));
        assert_eq!(filter, ProteinFilter::new());
        assert!(filter.matches(None, None, None));
    }

    #[test]
    fn test_entry_is_exact() {
        let filter = ProteinFilter::new().entry("P1");
        assert!(filter.matches(Some("P1"), None, None));
        assert!(!filter.matches(Some("P10"), None, None));
        assert!(!filter.matches(Some("p1"), None, None));
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let filter = ProteinFilter::new().interpro("kinase");
        assert!(filter.matches(Some("P1"), Some("Protein Kinase Domain"), None));
        assert!(!filter.matches(Some("P1"), Some("Phosphatase"), None));
    }

    #[test]
    fn test_substring_is_literal() {
        let filter = ProteinFilter::new().ec_number("2.7.*");
        assert!(!filter.matches(None, None, Some("2.7.11.1")));
        assert!(filter.matches(None, None, Some("EC 2.7.* (unassigned)")));
    }

    #[test]
    fn test_constrained_field_absent_never_matches() {
        let filter = ProteinFilter::new().ec_number("1.1");
        assert!(!filter.matches(Some("P1"), Some("IPR1"), None));
    }

    #[test]
    fn test_node_match_uses_id() {
        let node = ProteinNode::new("P2").with_ec_number("3.4.21.4;3.4.21.5");
        assert!(ProteinFilter::new().entry("P2").ec_number("3.4.21.5").matches_node(&node));
        assert!(!ProteinFilter::new().interpro("IPR").matches_node(&node));
    }
}
