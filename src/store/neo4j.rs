//! Neo4jGraphStore: protein similarity graph in Neo4j

use async_trait::async_trait;
use neo4rs::{Graph, Query, Row};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};

use super::{GraphCounts, GraphStore};
use crate::config::Neo4jConfig;
use crate::error::{DashboardError, DashboardResult, StoreKind};
use crate::model::{GraphProtein, Neighbor, ProteinFilter, SimilarityEdge, MISSING_ATTRIBUTE};
use crate::query::CypherQueries;
use crate::stats::EcCategory;

/// Graph store backed by a Neo4j database.
///
/// `Graph` owns a connection pool; `execute` borrows one connection per
/// statement and releases it when the row stream is dropped, error paths
/// included.
pub struct Neo4jGraphStore {
    graph: Arc<Graph>,
    queries: CypherQueries,
}

impl Neo4jGraphStore {
    /// Connect and verify the server answers before serving requests
    pub async fn connect(config: &Neo4jConfig) -> DashboardResult<Self> {
        let graph = Graph::new(&config.uri, &config.user, &config.password).await?;
        let store = Self::new(
            Arc::new(graph),
            CypherQueries::new(&config.node_label, &config.relationship_type),
        );
        store.ping().await?;

        info!("Connected to Neo4j at {}", config.uri);
        Ok(store)
    }

    pub fn new(graph: Arc<Graph>, queries: CypherQueries) -> Self {
        Self { graph, queries }
    }

    async fn rows(&self, query: Query) -> DashboardResult<Vec<Row>> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

fn field<T: DeserializeOwned>(row: &Row, key: &str) -> DashboardResult<T> {
    row.get::<T>(key)
        .map_err(|e| DashboardError::decode(StoreKind::Graph, format!("column {}: {}", key, e)))
}

fn count_field(row: &Row, key: &str) -> DashboardResult<u64> {
    let count: i64 = field(row, key)?;
    u64::try_from(count)
        .map_err(|_| DashboardError::decode(StoreKind::Graph, format!("negative {}: {}", key, count)))
}

fn edge_from_row(row: &Row) -> DashboardResult<SimilarityEdge> {
    let endpoint = |key: &str| -> DashboardResult<String> {
        field::<Option<String>>(row, key)?.ok_or_else(|| {
            DashboardError::decode(StoreKind::Graph, format!("similarity edge {} has no id", key))
        })
    };

    Ok(SimilarityEdge {
        source: endpoint("Source")?,
        target: endpoint("Target")?,
        weight: field(row, "Weight")?,
    })
}

#[async_trait]
impl GraphStore for Neo4jGraphStore {
    async fn search(&self, filter: &ProteinFilter) -> DashboardResult<Vec<GraphProtein>> {
        debug!(?filter, "neo4j protein search");

        let rows = self.rows(self.queries.search(filter)).await?;
        rows.iter()
            .map(|row| -> DashboardResult<GraphProtein> {
                Ok(GraphProtein::from_optional(
                    field(row, "Entry")?,
                    field(row, "InterPro")?,
                    field(row, "ECNumber")?,
                ))
            })
            .collect()
    }

    async fn neighbors(&self, protein_id: &str) -> DashboardResult<Vec<Neighbor>> {
        debug!(protein_id, "neo4j neighbors");

        let rows = self.rows(self.queries.neighbors(protein_id)).await?;
        rows.iter()
            .map(|row| -> DashboardResult<Neighbor> {
                let id: Option<String> = field(row, "NeighborID")?;
                Ok(Neighbor {
                    id: id.unwrap_or_else(|| MISSING_ATTRIBUTE.to_string()),
                    weight: field(row, "Weight")?,
                })
            })
            .collect()
    }

    async fn edges_for(&self, protein_id: &str) -> DashboardResult<Vec<SimilarityEdge>> {
        debug!(protein_id, "neo4j edges for protein");

        let rows = self.rows(self.queries.edges_for(protein_id)).await?;
        rows.iter().map(edge_from_row).collect()
    }

    async fn sample_edges(&self, limit: usize) -> DashboardResult<Vec<SimilarityEdge>> {
        debug!(limit, "neo4j sample edges");

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self.rows(self.queries.sample_edges(limit)).await?;
        rows.iter().map(edge_from_row).collect()
    }

    async fn ec_category_counts(&self) -> DashboardResult<Vec<(EcCategory, u64)>> {
        let rows = self.rows(self.queries.ec_categories()).await?;
        rows.iter()
            .map(|row| -> DashboardResult<(EcCategory, u64)> {
                let label: String = field(row, "ec_category")?;
                let category = EcCategory::from_label(&label).ok_or_else(|| {
                    DashboardError::decode(StoreKind::Graph, format!("unknown EC category {}", label))
                })?;
                Ok((category, count_field(row, "count")?))
            })
            .collect()
    }

    async fn counts(&self) -> DashboardResult<GraphCounts> {
        let rows = self.rows(self.queries.counts()).await?;
        match rows.first() {
            Some(row) => Ok(GraphCounts {
                nodes: count_field(row, "nodes")?,
                edges: count_field(row, "edges")?,
            }),
            None => Ok(GraphCounts::default()),
        }
    }

    async fn ping(&self) -> DashboardResult<()> {
        self.graph.run(self.queries.ping()).await?;
        Ok(())
    }
}
