//! Protein Dashboard
//!
//! Interactive exploration of a protein dataset that lives in two stores:
//! a document store holding protein records and a graph store holding
//! proteins joined by weighted domain-similarity relationships.
//!
//! # Architecture
//!
//! - `model`: protein records, graph nodes, similarity edges, search filters
//! - `query`: MongoDB filter documents and parameterized Cypher
//! - `store`: `DocumentStore` / `GraphStore` traits with MongoDB, Neo4j and
//!   in-memory implementations
//! - `graph`: similarity edges to a node/edge artifact, rendered as HTML
//! - `stats`: EC-number categories and sequence-length histograms
//! - `dashboard`: one method per user action
//! - `http`: the browser dashboard and its JSON API
//!
//! ## Example Usage
//!
//! ```rust
//! use protein_dashboard::{GraphBuilder, SimilarityEdge};
//!
//! let edges = vec![
//!     SimilarityEdge::new("P12345", "Q67890", 0.82),
//!     SimilarityEdge::new("P12345", "O11111", 0.35),
//! ];
//!
//! let artifact = GraphBuilder::default().assemble(&edges, Some("P12345")).unwrap();
//! assert_eq!(artifact.node_count(), 3);
//! assert_eq!(artifact.node("P12345").unwrap().color, "green");
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod graph;
pub mod http;
pub mod model;
pub mod query;
pub mod stats;
pub mod store;

// Re-export main types for convenience
pub use config::{Backend, DashboardConfig};
pub use dashboard::{DashboardStatus, ProteinDashboard};
pub use error::{DashboardError, DashboardResult, StoreKind};

pub use graph::{GraphArtifact, GraphBuilder, GraphPalette, HtmlRenderer, NodeRole};

pub use model::{GraphProtein, Neighbor, ProteinFilter, ProteinNode, ProteinRecord, SimilarityEdge};

pub use stats::{EcCategory, EcDistribution, LengthHistogram};

pub use store::{
    DocumentStore, EmbeddedDataset, GraphCounts, GraphStore, MemoryDocumentStore,
    MemoryGraphStore, MongoDocumentStore, Neo4jGraphStore,
};

pub use http::HttpServer;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
