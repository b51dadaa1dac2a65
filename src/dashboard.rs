//! The operations behind every dashboard action
//!
//! Each method serves one user action with one round trip to one store.
//! Store handles are injected at construction and shared for the process
//! lifetime.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::graph::{GraphArtifact, GraphBuilder, HtmlRenderer};
use crate::model::{GraphProtein, Neighbor, ProteinFilter, ProteinRecord};
use crate::stats::{self, EcDistribution};
use crate::store::{self, DocumentStore, GraphStore};

/// Sizes of both stores, for the status probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStatus {
    pub status: String,
    pub version: String,
    pub documents: u64,
    pub graph_nodes: u64,
    pub graph_edges: u64,
}

pub struct ProteinDashboard {
    documents: Arc<dyn DocumentStore>,
    graph: Arc<dyn GraphStore>,
    builder: GraphBuilder,
    renderer: HtmlRenderer,
}

fn log_failure<T>(operation: &str, result: DashboardResult<T>) -> DashboardResult<T> {
    if let Err(e) = &result {
        warn!(operation, error = %e, "dashboard operation failed");
    }
    result
}

fn require_entry(protein_id: &str) -> DashboardResult<()> {
    if protein_id.is_empty() {
        return Err(DashboardError::invalid_input("protein entry must not be empty"));
    }
    Ok(())
}

impl ProteinDashboard {
    pub fn new(documents: Arc<dyn DocumentStore>, graph: Arc<dyn GraphStore>) -> Self {
        Self {
            documents,
            graph,
            builder: GraphBuilder::default(),
            renderer: HtmlRenderer::default(),
        }
    }

    pub fn with_builder(mut self, builder: GraphBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_renderer(mut self, renderer: HtmlRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Open the configured stores and apply the configured palette and canvas
    pub async fn connect(config: &DashboardConfig) -> DashboardResult<Self> {
        let (documents, graph) = store::connect(config).await?;
        Ok(Self::new(documents, graph)
            .with_builder(GraphBuilder::new(config.visualization.palette.clone()))
            .with_renderer(config.visualization.canvas.clone()))
    }

    pub fn renderer(&self) -> &HtmlRenderer {
        &self.renderer
    }

    /// Documents matching the filter
    pub async fn search(&self, filter: &ProteinFilter) -> DashboardResult<Vec<ProteinRecord>> {
        debug!(?filter, "search documents");
        log_failure("search", self.documents.search(filter).await)
    }

    /// Number of documents matching the filter
    pub async fn count(&self, filter: &ProteinFilter) -> DashboardResult<u64> {
        debug!(?filter, "count documents");
        log_failure("count", self.documents.count(filter).await)
    }

    /// Protein nodes matching the filter
    pub async fn search_graph(&self, filter: &ProteinFilter) -> DashboardResult<Vec<GraphProtein>> {
        debug!(?filter, "search graph");
        log_failure("search_graph", self.graph.search(filter).await)
    }

    /// Direct neighbors of `protein_id` with their similarity weights
    pub async fn neighbors(&self, protein_id: &str) -> DashboardResult<Vec<Neighbor>> {
        require_entry(protein_id)?;
        debug!(protein_id, "neighbors");
        log_failure("neighbors", self.graph.neighbors(protein_id).await)
    }

    /// Artifact of `protein_id` and its direct neighbors
    pub async fn build_graph_for(&self, protein_id: &str) -> DashboardResult<GraphArtifact> {
        debug!(protein_id, "build graph for protein");
        log_failure(
            "build_graph_for",
            self.builder.build_for(self.graph.as_ref(), protein_id).await,
        )
    }

    /// Artifact of up to `limit` similarity edges; `limit` must be positive
    pub async fn build_graph_sample(&self, limit: i64) -> DashboardResult<GraphArtifact> {
        debug!(limit, "build sample graph");
        log_failure(
            "build_graph_sample",
            self.builder.build_sample(self.graph.as_ref(), limit).await,
        )
    }

    pub async fn ec_category_distribution(&self) -> DashboardResult<EcDistribution> {
        debug!("ec category distribution");
        log_failure(
            "ec_category_distribution",
            stats::ec_category_distribution(self.graph.as_ref()).await,
        )
    }

    pub async fn sequence_length_distribution(&self) -> DashboardResult<Vec<usize>> {
        debug!("sequence length distribution");
        log_failure(
            "sequence_length_distribution",
            stats::sequence_length_distribution(self.documents.as_ref()).await,
        )
    }

    /// Probe both stores; fails if either is unreachable
    pub async fn status(&self) -> DashboardResult<DashboardStatus> {
        debug!("status probe");
        let documents = log_failure("status", self.documents.count(&ProteinFilter::new()).await)?;
        let counts = log_failure("status", self.graph.counts().await)?;
        Ok(DashboardStatus {
            status: "healthy".to_string(),
            version: crate::VERSION.to_string(),
            documents,
            graph_nodes: counts.nodes,
            graph_edges: counts.edges,
        })
    }
}
