//! Error types for the protein dashboard

use std::fmt;
use thiserror::Error;

/// Which backing store a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// MongoDB (or the in-memory document store)
    Document,
    /// Neo4j (or the in-memory graph store)
    Graph,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Document => write!(f, "document store"),
            StoreKind::Graph => write!(f, "graph store"),
        }
    }
}

/// Errors that can occur while serving a dashboard operation
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Store unreachable, authentication rejected, or the round trip failed
    #[error("{store} unavailable: {message}")]
    Connectivity { store: StoreKind, message: String },

    /// The store answered, but a record did not have the expected shape
    #[error("{store} returned a malformed record: {message}")]
    Decode { store: StoreKind, message: String },

    /// Rejected before any store round trip
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A similarity edge without a numeric weight reached the graph builder
    #[error("Similarity edge {from} - {to} has no usable weight")]
    InvalidEdgeWeight { from: String, to: String },

    /// An edge was added before both of its endpoints
    #[error("Edge {from} - {to} references a node missing from the artifact")]
    DanglingEdge { from: String, to: String },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn connectivity(store: StoreKind, message: impl Into<String>) -> Self {
        DashboardError::Connectivity {
            store,
            message: message.into(),
        }
    }

    pub fn decode(store: StoreKind, message: impl Into<String>) -> Self {
        DashboardError::Decode {
            store,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        DashboardError::InvalidInput(message.into())
    }

    /// True when the failure means "the query could not run", as opposed to bad input
    pub fn is_connectivity(&self) -> bool {
        matches!(self, DashboardError::Connectivity { .. })
    }
}

impl From<mongodb::error::Error> for DashboardError {
    fn from(err: mongodb::error::Error) -> Self {
        DashboardError::connectivity(StoreKind::Document, err.to_string())
    }
}

impl From<neo4rs::Error> for DashboardError {
    fn from(err: neo4rs::Error) -> Self {
        DashboardError::connectivity(StoreKind::Graph, err.to_string())
    }
}

impl From<serde_yaml::Error> for DashboardError {
    fn from(err: serde_yaml::Error) -> Self {
        DashboardError::Config(err.to_string())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
