//! Turns similarity edges from the graph store into a [`GraphArtifact`]

use std::num::NonZeroUsize;

use super::artifact::{GraphArtifact, GraphPalette, NodeRole};
use crate::error::{DashboardError, DashboardResult};
use crate::model::SimilarityEdge;
use crate::store::GraphStore;

/// Reject a non-positive sample size before it reaches a store
pub fn validate_limit(limit: i64) -> DashboardResult<NonZeroUsize> {
    usize::try_from(limit)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            DashboardError::invalid_input(format!("sample limit must be positive, got {}", limit))
        })
}

/// Builds visualization artifacts with one palette
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    palette: GraphPalette,
}

impl GraphBuilder {
    pub fn new(palette: GraphPalette) -> Self {
        Self { palette }
    }

    /// Core transformation shared by both entry points.
    ///
    /// Edges are consumed in order: source node, target node, then the edge.
    /// Nodes whose id equals `focal` get the focal color, all others the
    /// neighbor color. An edge without a finite weight fails the whole build.
    pub fn assemble(
        &self,
        edges: &[SimilarityEdge],
        focal: Option<&str>,
    ) -> DashboardResult<GraphArtifact> {
        let role_of = |id: &str| {
            if focal == Some(id) {
                NodeRole::Focal
            } else {
                NodeRole::Neighbor
            }
        };

        let mut artifact = GraphArtifact::new();
        for edge in edges {
            let weight = edge.weight.filter(|w| w.is_finite()).ok_or_else(|| {
                DashboardError::InvalidEdgeWeight {
                    from: edge.source.clone(),
                    to: edge.target.clone(),
                }
            })?;

            artifact.add_node(&edge.source, role_of(&edge.source), &self.palette);
            artifact.add_node(&edge.target, role_of(&edge.target), &self.palette);
            artifact.add_edge(&edge.source, &edge.target, weight, &self.palette)?;
        }
        Ok(artifact)
    }

    /// Graph of `protein_id` and its direct neighbors
    pub async fn build_for(
        &self,
        store: &dyn GraphStore,
        protein_id: &str,
    ) -> DashboardResult<GraphArtifact> {
        if protein_id.is_empty() {
            return Err(DashboardError::invalid_input("protein entry must not be empty"));
        }
        let edges = store.edges_for(protein_id).await?;
        self.assemble(&edges, Some(protein_id))
    }

    /// Graph of up to `limit` edges from anywhere in the store; no focal node
    pub async fn build_sample(
        &self,
        store: &dyn GraphStore,
        limit: i64,
    ) -> DashboardResult<GraphArtifact> {
        let limit = validate_limit(limit)?;
        let edges = store.sample_edges(limit.get()).await?;
        self.assemble(&edges, None)
    }
}
