//! Dashboard configuration
//!
//! Loaded from an optional YAML file; every section and field has a default,
//! so a partial file only overrides what it names.
//!
//! ```yaml
//! backend: remote
//! http:
//!   port: 8501
//! mongo:
//!   uri: mongodb://localhost:27017/
//!   database: Project-1st-Semester
//!   collection: protein_data
//! neo4j:
//!   uri: bolt://localhost:7687
//!   user: neo4j
//!   password: secret
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, DashboardResult};
use crate::graph::{GraphPalette, HtmlRenderer};
use crate::query::{is_valid_identifier, DEFAULT_NODE_LABEL, DEFAULT_RELATIONSHIP_TYPE};

/// Which pair of stores to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// MongoDB + Neo4j
    #[default]
    Remote,
    /// In-memory stores loaded from `embedded.dataset`
    Embedded,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub backend: Backend,
    pub http: HttpConfig,
    pub mongo: MongoConfig,
    pub neo4j: Neo4jConfig,
    pub embedded: EmbeddedConfig,
    pub visualization: VisualizationConfig,
}

/// HTTP dashboard bind address
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// How long to wait for a reachable server before failing a request
    pub server_selection_timeout_secs: u64,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/".to_string(),
            database: "Project-1st-Semester".to_string(),
            collection: "protein_data".to_string(),
            server_selection_timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub node_label: String,
    pub relationship_type: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: String::new(),
            node_label: DEFAULT_NODE_LABEL.to_string(),
            relationship_type: DEFAULT_RELATIONSHIP_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedConfig {
    /// JSON dataset with `documents`, `nodes` and `edges`
    pub dataset: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizationConfig {
    pub canvas: HtmlRenderer,
    pub palette: GraphPalette,
    /// Overwritten by every single-protein graph written to disk
    pub protein_graph_file: PathBuf,
    /// Overwritten by every sample graph written to disk
    pub sample_graph_file: PathBuf,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            canvas: HtmlRenderer::default(),
            palette: GraphPalette::default(),
            protein_graph_file: PathBuf::from("protein_graph.html"),
            sample_graph_file: PathBuf::from("limited_protein_graph.html"),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a YAML config file
    pub fn load(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> DashboardResult<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// The file at `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> DashboardResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> DashboardResult<()> {
        for (key, value) in [
            ("neo4j.node_label", &self.neo4j.node_label),
            ("neo4j.relationship_type", &self.neo4j.relationship_type),
        ] {
            if !is_valid_identifier(value) {
                return Err(DashboardError::Config(format!(
                    "{} must be a plain identifier, got {:?}",
                    key, value
                )));
            }
        }

        if self.backend == Backend::Embedded && self.embedded.dataset.is_none() {
            return Err(DashboardError::Config(
                "embedded backend requires embedded.dataset".to_string(),
            ));
        }
        Ok(())
    }
}
