//! End-to-end dashboard operations over the in-memory backend
//!
//! Exercises:
//! - document search / count under the shared filter contract
//! - graph search, neighbor lookup and graph building
//! - EC and sequence-length statistics
//! - error taxonomy: invalid input, connectivity, invalid edge weight

use async_trait::async_trait;
use protein_dashboard::*;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_proteins.json")
}

fn sample_dashboard() -> ProteinDashboard {
    let (documents, graph) = EmbeddedDataset::load(dataset_path())
        .unwrap()
        .into_stores()
        .unwrap();
    ProteinDashboard::new(Arc::new(documents), Arc::new(graph))
}

fn record(value: serde_json::Value) -> ProteinRecord {
    ProteinRecord::try_from(value).unwrap()
}

/// Graph store that never answers
struct UnreachableGraph;

#[async_trait]
impl GraphStore for UnreachableGraph {
    async fn search(&self, _: &ProteinFilter) -> DashboardResult<Vec<GraphProtein>> {
        Err(refused())
    }
    async fn neighbors(&self, _: &str) -> DashboardResult<Vec<Neighbor>> {
        Err(refused())
    }
    async fn edges_for(&self, _: &str) -> DashboardResult<Vec<SimilarityEdge>> {
        Err(refused())
    }
    async fn sample_edges(&self, _: usize) -> DashboardResult<Vec<SimilarityEdge>> {
        Err(refused())
    }
    async fn ec_category_counts(&self) -> DashboardResult<Vec<(EcCategory, u64)>> {
        Err(refused())
    }
    async fn counts(&self) -> DashboardResult<GraphCounts> {
        Err(refused())
    }
    async fn ping(&self) -> DashboardResult<()> {
        Err(refused())
    }
}

fn refused() -> DashboardError {
    DashboardError::connectivity(StoreKind::Graph, "connection refused")
}

/// Graph store that counts every round trip
struct CountingGraph {
    inner: MemoryGraphStore,
    calls: AtomicUsize,
}

impl CountingGraph {
    fn new(inner: MemoryGraphStore) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl GraphStore for CountingGraph {
    async fn search(&self, filter: &ProteinFilter) -> DashboardResult<Vec<GraphProtein>> {
        self.hit();
        self.inner.search(filter).await
    }
    async fn neighbors(&self, protein_id: &str) -> DashboardResult<Vec<Neighbor>> {
        self.hit();
        self.inner.neighbors(protein_id).await
    }
    async fn edges_for(&self, protein_id: &str) -> DashboardResult<Vec<SimilarityEdge>> {
        self.hit();
        self.inner.edges_for(protein_id).await
    }
    async fn sample_edges(&self, limit: usize) -> DashboardResult<Vec<SimilarityEdge>> {
        self.hit();
        self.inner.sample_edges(limit).await
    }
    async fn ec_category_counts(&self) -> DashboardResult<Vec<(EcCategory, u64)>> {
        self.hit();
        self.inner.ec_category_counts().await
    }
    async fn counts(&self) -> DashboardResult<GraphCounts> {
        self.hit();
        self.inner.counts().await
    }
    async fn ping(&self) -> DashboardResult<()> {
        self.hit();
        self.inner.ping().await
    }
}

#[tokio::test]
async fn test_unfiltered_search_returns_everything() {
    let dashboard = sample_dashboard();
    let all = dashboard.search(&ProteinFilter::new()).await.unwrap();
    assert_eq!(all.len(), 8);
    assert_eq!(all[0].entry(), Some("P00533"));
}

#[tokio::test]
async fn test_count_agrees_with_search() {
    let dashboard = sample_dashboard();
    let filters = vec![
        ProteinFilter::new(),
        ProteinFilter::new().entry("P04637"),
        ProteinFilter::new().interpro("ipr000719"),
        ProteinFilter::new().ec_number("2.7.10"),
        ProteinFilter::new().interpro("IPR000719").ec_number("2.7.11"),
        ProteinFilter::new().entry("NOPE"),
    ];

    for filter in filters {
        let found = dashboard.search(&filter).await.unwrap();
        let count = dashboard.count(&filter).await.unwrap();
        assert_eq!(count, found.len() as u64, "filter {:?}", filter);
    }
}

#[tokio::test]
async fn test_substring_filters_ignore_case() {
    let dashboard = sample_dashboard();

    let kinases = dashboard
        .search(&ProteinFilter::new().interpro("ipr000719"))
        .await
        .unwrap();
    let entries: Vec<&str> = kinases.iter().filter_map(|r| r.entry()).collect();
    assert_eq!(entries, vec!["P00533", "P06213", "P00519", "P11309"]);

    // Entry is an exact match, not a substring
    assert!(dashboard
        .search(&ProteinFilter::new().entry("P0053"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_empty_inputs_mean_no_filter() {
    let dashboard = sample_dashboard();
    let filter = ProteinFilter::from_inputs(Some(String::new()), Some(String::new()), None);
    assert_eq!(dashboard.count(&filter).await.unwrap(), 8);
}

#[tokio::test]
async fn test_regex_metacharacters_are_literal() {
    let documents = MemoryDocumentStore::with_records(vec![
        record(json!({"Entry": "P1", "EC number": "2.7.11.1"})),
        record(json!({"Entry": "P2", "EC number": "2x7x11x1"})),
    ]);
    let dashboard = ProteinDashboard::new(Arc::new(documents), Arc::new(MemoryGraphStore::new()));

    let found = dashboard
        .search(&ProteinFilter::new().ec_number("2.7"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entry(), Some("P1"));
}

#[tokio::test]
async fn test_graph_search_fills_missing_attributes() {
    let dashboard = sample_dashboard();
    let proteins = dashboard
        .search_graph(&ProteinFilter::new().entry("P04637"))
        .await
        .unwrap();

    assert_eq!(proteins.len(), 1);
    assert_eq!(proteins[0].ec_number, "N/A");
    assert_eq!(
        serde_json::to_value(&proteins[0]).unwrap()["ECNumber"],
        json!("N/A")
    );

    let kinases = dashboard
        .search_graph(&ProteinFilter::new().interpro("IPR000719").ec_number("2.7.10"))
        .await
        .unwrap();
    assert_eq!(kinases.len(), 3);
}

#[tokio::test]
async fn test_neighbors_in_store_order() {
    let dashboard = sample_dashboard();
    let neighbors = dashboard.neighbors("P00533").await.unwrap();

    let ids: Vec<&str> = neighbors.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["P06213", "P00519", "P11309"]);
    assert_eq!(neighbors[0].weight, Some(0.6));
    assert_eq!(neighbors[0].to_string(), "Neighbor: P06213, Weight: 0.6");

    // Isolated protein: empty, not an error
    assert!(dashboard.neighbors("P68871").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_neighbors_rejects_empty_entry() {
    let dashboard = sample_dashboard();
    let err = dashboard.neighbors("").await.unwrap_err();
    assert!(matches!(err, DashboardError::InvalidInput(_)));
}

#[tokio::test]
async fn test_graph_for_protein_colors() {
    let dashboard = sample_dashboard();
    let neighbors = dashboard.neighbors("P00533").await.unwrap();
    let artifact = dashboard.build_graph_for("P00533").await.unwrap();

    assert_eq!(artifact.node_count(), neighbors.len() + 1);
    assert_eq!(artifact.edge_count(), neighbors.len());

    let focal = artifact.node("P00533").unwrap();
    assert_eq!(focal.color, "green");
    assert_eq!(focal.title, "Protein: P00533");

    for neighbor in &neighbors {
        assert_eq!(artifact.node(&neighbor.id).unwrap().color, "red");
    }
    assert!(artifact
        .nodes()
        .all(|n| n.color == "green" || n.color == "red"));

    let first = &artifact.edges()[0];
    assert_eq!(first.title, "Weight: 0.6000");
    assert!((first.width - 0.72).abs() < 1e-9);
    assert_eq!(first.color, "blue");
}

#[tokio::test]
async fn test_graph_for_protein_is_idempotent() {
    let dashboard = sample_dashboard();
    let first = dashboard.build_graph_for("P11309").await.unwrap();
    let second = dashboard.build_graph_for("P11309").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_graph_for_unknown_protein_is_empty() {
    let dashboard = sample_dashboard();
    let artifact = dashboard.build_graph_for("UNKNOWN").await.unwrap();
    assert!(artifact.is_empty());
}

#[tokio::test]
async fn test_sample_graph_has_no_focal_node() {
    let dashboard = sample_dashboard();
    let artifact = dashboard.build_graph_sample(2).await.unwrap();

    assert_eq!(artifact.edge_count(), 2);
    assert_eq!(artifact.node_count(), 3);
    assert!(artifact.nodes().all(|n| n.color == "red"));

    let everything = dashboard.build_graph_sample(100).await.unwrap();
    assert_eq!(everything.edge_count(), 6);
}

#[tokio::test]
async fn test_sample_limit_validated_before_store() {
    let (_, graph) = EmbeddedDataset::load(dataset_path())
        .unwrap()
        .into_stores()
        .unwrap();
    let counting = Arc::new(CountingGraph::new(graph));
    let dashboard = ProteinDashboard::new(
        Arc::new(MemoryDocumentStore::new()),
        Arc::clone(&counting) as Arc<dyn GraphStore>,
    );

    for limit in [0, -1, i64::MIN] {
        let err = dashboard.build_graph_sample(limit).await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }
    assert_eq!(counting.calls(), 0);

    dashboard.build_graph_sample(1).await.unwrap();
    assert_eq!(counting.calls(), 1);
}

#[tokio::test]
async fn test_missing_weight_fails_graph_build() {
    let graph = MemoryGraphStore::from_parts(
        vec![ProteinNode::new("A"), ProteinNode::new("B")],
        vec![SimilarityEdge {
            source: "A".to_string(),
            target: "B".to_string(),
            weight: None,
        }],
    )
    .unwrap();
    let dashboard = ProteinDashboard::new(Arc::new(MemoryDocumentStore::new()), Arc::new(graph));

    let err = dashboard.build_graph_for("A").await.unwrap_err();
    assert!(matches!(err, DashboardError::InvalidEdgeWeight { .. }));

    // Neighbor lookup still reports the edge, weight shown as N/A
    let neighbors = dashboard.neighbors("A").await.unwrap();
    assert_eq!(neighbors[0].to_string(), "Neighbor: B, Weight: N/A");
}

#[tokio::test]
async fn test_ec_distribution_sums_to_node_count() {
    let dashboard = sample_dashboard();
    let distribution = dashboard.ec_category_distribution().await.unwrap();
    let status = dashboard.status().await.unwrap();

    assert_eq!(distribution.total(), status.graph_nodes);
    assert_eq!(distribution.count(EcCategory::NoEcNumber), 3);
    assert_eq!(distribution.count(EcCategory::OneEcNumber), 4);
    assert_eq!(distribution.count(EcCategory::MultipleEcNumbers), 1);
}

#[tokio::test]
async fn test_sequence_lengths_skip_absent_and_empty() {
    let dashboard = sample_dashboard();
    let lengths = dashboard.sequence_length_distribution().await.unwrap();

    let expected: Vec<usize> = dashboard
        .search(&ProteinFilter::new())
        .await
        .unwrap()
        .iter()
        .filter_map(|r| r.sequence())
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().count())
        .collect();

    assert_eq!(lengths.len(), 6);
    assert_eq!(lengths, expected);
    assert!(lengths.iter().all(|&l| l > 0));

    let histogram = LengthHistogram::from_lengths(&lengths, 200).unwrap();
    assert_eq!(histogram.total(), lengths.len());
}

#[tokio::test]
async fn test_kinase_substring_end_to_end() {
    let sequence = "MKVLAAGIVGLLLAAPAQAA";
    let documents = MemoryDocumentStore::with_records(vec![record(json!({
        "Entry": "P1",
        "InterPro": "Kinase",
        "Sequence": sequence,
    }))]);
    let dashboard = ProteinDashboard::new(Arc::new(documents), Arc::new(MemoryGraphStore::new()));

    let filter = ProteinFilter::new().interpro("kinas");
    let found = dashboard.search(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entry(), Some("P1"));
    assert_eq!(dashboard.count(&filter).await.unwrap(), 1);
    assert_eq!(dashboard.sequence_length_distribution().await.unwrap(), vec![20]);
}

#[tokio::test]
async fn test_unreachable_store_is_not_an_empty_result() {
    let dashboard = ProteinDashboard::new(
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(UnreachableGraph),
    );

    let err = dashboard
        .search_graph(&ProteinFilter::new())
        .await
        .unwrap_err();
    assert!(err.is_connectivity());
    assert!(err.to_string().contains("graph store"));

    assert!(dashboard.neighbors("P1").await.unwrap_err().is_connectivity());
    assert!(dashboard.build_graph_for("P1").await.unwrap_err().is_connectivity());
    assert!(dashboard.ec_category_distribution().await.unwrap_err().is_connectivity());
    assert!(dashboard.status().await.unwrap_err().is_connectivity());

    // The document side is unaffected
    assert_eq!(dashboard.count(&ProteinFilter::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_status_reports_store_sizes() {
    let status = sample_dashboard().status().await.unwrap();
    assert_eq!(status.status, "healthy");
    assert_eq!(status.documents, 8);
    assert_eq!(status.graph_nodes, 8);
    assert_eq!(status.graph_edges, 6);
}

#[tokio::test]
async fn test_connect_embedded_backend() {
    let mut config = DashboardConfig::default();
    config.backend = Backend::Embedded;
    config.embedded.dataset = Some(dataset_path());
    config.visualization.palette.focal = "orange".to_string();

    let dashboard = ProteinDashboard::connect(&config).await.unwrap();
    let artifact = dashboard.build_graph_for("P00533").await.unwrap();
    assert_eq!(artifact.node("P00533").unwrap().color, "orange");
}

#[tokio::test]
async fn test_write_graph_file() {
    let dir = tempfile::tempdir().unwrap();
    let dashboard = sample_dashboard();
    let artifact = dashboard.build_graph_for("P00533").await.unwrap();

    let path = dashboard
        .renderer()
        .write(&artifact, "Protein Graph for Entry: P00533", dir.path().join("protein_graph.html"))
        .unwrap();

    let html = std::fs::read_to_string(path).unwrap();
    assert!(html.contains("Protein Graph for Entry: P00533"));
    assert!(html.contains("Protein: P06213"));
}
