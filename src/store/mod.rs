//! Backing store interfaces
//!
//! The dashboard talks to two independent stores through these traits:
//! - [`DocumentStore`]: protein documents (`Entry`, `InterPro`, `EC number`, `Sequence`)
//! - [`GraphStore`]: protein nodes joined by weighted similarity edges
//!
//! Implemented by:
//! - `MongoDocumentStore` / `Neo4jGraphStore`: network drivers, one shared
//!   connection pool per process; every call checks out its own session
//! - `MemoryDocumentStore` / `MemoryGraphStore`: in-process, loaded from a
//!   JSON dataset (offline demos and tests)
//!
//! Every method is exactly one round trip. An empty `Vec` means "no matches";
//! a store that cannot be reached returns `DashboardError::Connectivity`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::config::{Backend, DashboardConfig};
use crate::error::{DashboardError, DashboardResult};
use crate::model::{GraphProtein, Neighbor, ProteinFilter, ProteinRecord, SimilarityEdge};
use crate::stats::EcCategory;

pub mod memory;
pub mod mongo;
pub mod neo4j;

pub use memory::{EmbeddedDataset, MemoryDocumentStore, MemoryGraphStore};
pub use mongo::MongoDocumentStore;
pub use neo4j::Neo4jGraphStore;

/// Node and edge totals of the graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphCounts {
    pub nodes: u64,
    pub edges: u64,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents matching the filter
    async fn search(&self, filter: &ProteinFilter) -> DashboardResult<Vec<ProteinRecord>>;

    /// Number of documents matching the filter
    async fn count(&self, filter: &ProteinFilter) -> DashboardResult<u64>;

    /// Every string-valued `Sequence`, empty ones included
    async fn sequences(&self) -> DashboardResult<Vec<String>>;

    /// Cheap health probe
    async fn ping(&self) -> DashboardResult<()>;
}

#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Protein nodes matching the filter, missing attributes as `"N/A"`
    async fn search(&self, filter: &ProteinFilter) -> DashboardResult<Vec<GraphProtein>>;

    /// Proteins one similarity edge away from `protein_id`
    async fn neighbors(&self, protein_id: &str) -> DashboardResult<Vec<Neighbor>>;

    /// Edges touching `protein_id`, oriented `protein_id -> neighbor`
    async fn edges_for(&self, protein_id: &str) -> DashboardResult<Vec<SimilarityEdge>>;

    /// Up to `limit` similarity edges from anywhere in the graph
    async fn sample_edges(&self, limit: usize) -> DashboardResult<Vec<SimilarityEdge>>;

    /// Node count per EC category; categories with no nodes may be omitted
    async fn ec_category_counts(&self) -> DashboardResult<Vec<(EcCategory, u64)>>;

    async fn counts(&self) -> DashboardResult<GraphCounts>;

    /// Cheap health probe
    async fn ping(&self) -> DashboardResult<()>;
}

/// Open both stores as configured. Called once at process start.
pub async fn connect(
    config: &DashboardConfig,
) -> DashboardResult<(Arc<dyn DocumentStore>, Arc<dyn GraphStore>)> {
    match config.backend {
        Backend::Remote => {
            let documents = MongoDocumentStore::connect(&config.mongo).await?;
            let graph = Neo4jGraphStore::connect(&config.neo4j).await?;
            Ok((Arc::new(documents), Arc::new(graph)))
        }
        Backend::Embedded => {
            let path = config.embedded.dataset.as_ref().ok_or_else(|| {
                DashboardError::Config("embedded backend requires embedded.dataset".to_string())
            })?;
            let (documents, graph) = EmbeddedDataset::load(path)?.into_stores()?;
            info!(
                "Loaded embedded dataset {} ({} documents, {} nodes)",
                path.display(),
                documents.len(),
                graph.node_count()
            );
            Ok((Arc::new(documents), Arc::new(graph)))
        }
    }
}
