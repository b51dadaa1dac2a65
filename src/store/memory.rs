//! In-process stores, no network needed
//!
//! Both stores evaluate the same filter contract as the network drivers, so
//! they stand in for MongoDB and Neo4j in offline demos and tests.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use super::{DocumentStore, GraphCounts, GraphStore};
use crate::error::{DashboardError, DashboardResult};
use crate::model::{
    GraphProtein, Neighbor, ProteinFilter, ProteinNode, ProteinRecord, SimilarityEdge,
};
use crate::stats::EcCategory;

/// Protein documents held in a `Vec`, in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    records: Vec<ProteinRecord>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ProteinRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn search(&self, filter: &ProteinFilter) -> DashboardResult<Vec<ProteinRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| filter.matches_record(record))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ProteinFilter) -> DashboardResult<u64> {
        Ok(self
            .records
            .iter()
            .filter(|record| filter.matches_record(record))
            .count() as u64)
    }

    async fn sequences(&self) -> DashboardResult<Vec<String>> {
        Ok(self
            .records
            .iter()
            .filter_map(|record| record.sequence())
            .map(str::to_owned)
            .collect())
    }

    async fn ping(&self) -> DashboardResult<()> {
        Ok(())
    }
}

/// Protein nodes keyed by id plus an undirected edge list.
///
/// Edges are kept in insertion order, which is the "store-native" order the
/// lookups report.
#[derive(Debug, Clone, Default)]
pub struct MemoryGraphStore {
    nodes: IndexMap<String, ProteinNode>,
    edges: Vec<SimilarityEdge>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from nodes and edges; every edge endpoint must be a known node
    pub fn from_parts(
        nodes: impl IntoIterator<Item = ProteinNode>,
        edges: impl IntoIterator<Item = SimilarityEdge>,
    ) -> DashboardResult<Self> {
        let mut store = Self::new();
        for node in nodes {
            store.add_node(node);
        }
        for edge in edges {
            store.add_edge(edge)?;
        }
        Ok(store)
    }

    /// Insert or replace a node
    pub fn add_node(&mut self, node: ProteinNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn add_edge(&mut self, edge: SimilarityEdge) -> DashboardResult<()> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(DashboardError::invalid_input(format!(
                    "similarity edge references unknown protein {}",
                    endpoint
                )));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn touching<'a>(&'a self, protein_id: &'a str) -> impl Iterator<Item = (&'a str, Option<f64>)> + 'a {
        self.edges
            .iter()
            .filter_map(move |edge| edge.other_end(protein_id).map(|other| (other, edge.weight)))
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn search(&self, filter: &ProteinFilter) -> DashboardResult<Vec<GraphProtein>> {
        Ok(self
            .nodes
            .values()
            .filter(|node| filter.matches_node(node))
            .map(|node| {
                GraphProtein::from_optional(
                    Some(node.id.clone()),
                    node.interpro.clone(),
                    node.ec_number.clone(),
                )
            })
            .collect())
    }

    async fn neighbors(&self, protein_id: &str) -> DashboardResult<Vec<Neighbor>> {
        Ok(self
            .touching(protein_id)
            .map(|(other, weight)| Neighbor {
                id: other.to_string(),
                weight,
            })
            .collect())
    }

    async fn edges_for(&self, protein_id: &str) -> DashboardResult<Vec<SimilarityEdge>> {
        Ok(self
            .touching(protein_id)
            .map(|(other, weight)| SimilarityEdge {
                source: protein_id.to_string(),
                target: other.to_string(),
                weight,
            })
            .collect())
    }

    async fn sample_edges(&self, limit: usize) -> DashboardResult<Vec<SimilarityEdge>> {
        Ok(self.edges.iter().take(limit).cloned().collect())
    }

    async fn ec_category_counts(&self) -> DashboardResult<Vec<(EcCategory, u64)>> {
        let mut counts: IndexMap<EcCategory, u64> = IndexMap::new();
        for node in self.nodes.values() {
            *counts
                .entry(EcCategory::classify(node.ec_number.as_deref()))
                .or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn counts(&self) -> DashboardResult<GraphCounts> {
        Ok(GraphCounts {
            nodes: self.nodes.len() as u64,
            edges: self.edges.len() as u64,
        })
    }

    async fn ping(&self) -> DashboardResult<()> {
        Ok(())
    }
}

/// On-disk layout of an embedded dataset:
///
/// ```json
/// {
///   "documents": [{"Entry": "P1", "InterPro": "...", "EC number": "...", "Sequence": "..."}],
///   "nodes": [{"id": "P1", "interpro": "...", "ec_number": "..."}],
///   "edges": [{"source": "P1", "target": "P2", "weight": 0.42}]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmbeddedDataset {
    #[serde(default)]
    pub documents: Vec<ProteinRecord>,
    #[serde(default)]
    pub nodes: Vec<ProteinNode>,
    #[serde(default)]
    pub edges: Vec<SimilarityEdge>,
}

impl EmbeddedDataset {
    pub fn load(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn into_stores(self) -> DashboardResult<(MemoryDocumentStore, MemoryGraphStore)> {
        let graph = MemoryGraphStore::from_parts(self.nodes, self.edges)?;
        Ok((MemoryDocumentStore::with_records(self.documents), graph))
    }
}
