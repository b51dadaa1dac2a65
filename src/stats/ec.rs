//! EC-number cardinality distribution

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

use crate::error::DashboardResult;
use crate::store::GraphStore;

/// How many EC codes a protein carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EcCategory {
    NoEcNumber,
    OneEcNumber,
    MultipleEcNumbers,
}

impl EcCategory {
    pub const ALL: [EcCategory; 3] = [
        EcCategory::NoEcNumber,
        EcCategory::OneEcNumber,
        EcCategory::MultipleEcNumbers,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EcCategory::NoEcNumber => "No EC number",
            EcCategory::OneEcNumber => "One EC number",
            EcCategory::MultipleEcNumbers => "Multiple EC numbers",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    /// Split on `;` and count the pieces, as the graph store does with
    /// `size(split(ec_number, ';'))`. An empty string is one (empty) code.
    pub fn classify(ec_number: Option<&str>) -> Self {
        match ec_number {
            None => EcCategory::NoEcNumber,
            Some(codes) if codes.split(';').count() == 1 => EcCategory::OneEcNumber,
            Some(_) => EcCategory::MultipleEcNumbers,
        }
    }
}

/// Node count per [`EcCategory`]; every category is present, possibly zero.
///
/// Serializes as `{"No EC number": n, "One EC number": n, "Multiple EC numbers": n}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcDistribution {
    counts: IndexMap<EcCategory, u64>,
}

impl Default for EcDistribution {
    fn default() -> Self {
        Self {
            counts: EcCategory::ALL.into_iter().map(|c| (c, 0)).collect(),
        }
    }
}

impl EcDistribution {
    pub fn from_counts(counts: impl IntoIterator<Item = (EcCategory, u64)>) -> Self {
        let mut distribution = Self::default();
        for (category, count) in counts {
            *distribution.counts.entry(category).or_insert(0) += count;
        }
        distribution
    }

    pub fn count(&self, category: EcCategory) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Fraction of all nodes in `category`, `0.0` for an empty graph
    pub fn share(&self, category: EcCategory) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(category) as f64 / total as f64,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EcCategory, u64)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }
}

impl Serialize for EcDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(category, count)| (category.label(), count)))
    }
}

/// Classify every protein node of the graph store
pub async fn ec_category_distribution(store: &dyn GraphStore) -> DashboardResult<EcDistribution> {
    let counts = store.ec_category_counts().await?;
    Ok(EcDistribution::from_counts(counts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(EcCategory::classify(None), EcCategory::NoEcNumber);
        assert_eq!(EcCategory::classify(Some("2.7.11.1")), EcCategory::OneEcNumber);
        assert_eq!(EcCategory::classify(Some("")), EcCategory::OneEcNumber);
        assert_eq!(
            EcCategory::classify(Some("3.4.21.4; 3.4.21.5")),
            EcCategory::MultipleEcNumbers
        );
    }

    #[test]
    fn test_label_round_trip() {
        for category in EcCategory::ALL {
            assert_eq!(EcCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(EcCategory::from_label("Two EC numbers"), None);
    }

    #[test]
    fn test_distribution_fills_missing_categories() {
        let distribution = EcDistribution::from_counts(vec![(EcCategory::OneEcNumber, 3)]);
        assert_eq!(distribution.count(EcCategory::NoEcNumber), 0);
        assert_eq!(distribution.total(), 3);
        assert_eq!(distribution.iter().count(), 3);
    }

    #[test]
    fn test_shares() {
        let distribution = EcDistribution::from_counts(vec![
            (EcCategory::NoEcNumber, 1),
            (EcCategory::OneEcNumber, 3),
        ]);
        assert!((distribution.share(EcCategory::OneEcNumber) - 0.75).abs() < 1e-12);
        assert_eq!(EcDistribution::default().share(EcCategory::OneEcNumber), 0.0);
    }

    #[test]
    fn test_serializes_as_label_map() {
        let distribution = EcDistribution::from_counts(vec![(EcCategory::MultipleEcNumbers, 2)]);
        let value = serde_json::to_value(&distribution).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "No EC number": 0,
                "One EC number": 0,
                "Multiple EC numbers": 2
            })
        );
    }
}
