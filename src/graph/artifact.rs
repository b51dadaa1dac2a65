//! Node/edge visualization artifact
//!
//! Field names follow the vis-network data model (`from`, `to`, `value`,
//! `title`), so the artifact serializes straight into the rendered page.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{DashboardError, DashboardResult};

/// Edge display width per unit of similarity weight
pub const EDGE_WIDTH_SCALE: f64 = 1.2;

/// Colors and font used for graph artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphPalette {
    /// The protein a graph was built around
    pub focal: String,
    /// Every other protein
    pub neighbor: String,
    pub edge: String,
    pub font_size: u32,
    pub font_color: String,
}

impl Default for GraphPalette {
    fn default() -> Self {
        Self {
            focal: "green".to_string(),
            neighbor: "red".to_string(),
            edge: "blue".to_string(),
            font_size: 15,
            font_color: "black".to_string(),
        }
    }
}

/// Whether a node is the protein the graph is centred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Focal,
    Neighbor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeFont {
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactNode {
    pub id: String,
    pub label: String,
    /// Tooltip
    pub title: String,
    pub color: String,
    pub font: NodeFont,
    #[serde(skip)]
    pub role: NodeRole,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactEdge {
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
    #[serde(rename = "value")]
    pub weight: f64,
    /// Tooltip
    pub title: String,
    pub color: String,
    pub width: f64,
}

/// De-duplicated nodes plus the edges between them.
///
/// Nodes keep first-insertion order. An edge can only be added once both
/// endpoints are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphArtifact {
    #[serde(serialize_with = "serialize_nodes")]
    nodes: IndexMap<String, ArtifactNode>,
    edges: Vec<ArtifactEdge>,
}

fn serialize_nodes<S: Serializer>(
    nodes: &IndexMap<String, ArtifactNode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(nodes.values())
}

impl GraphArtifact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node unless one with the same id exists.
    ///
    /// Returns `true` when the node was inserted; a repeat is a no-op and
    /// keeps the first node's attributes.
    pub fn add_node(&mut self, id: &str, role: NodeRole, palette: &GraphPalette) -> bool {
        if self.nodes.contains_key(id) {
            return false;
        }

        let color = match role {
            NodeRole::Focal => &palette.focal,
            NodeRole::Neighbor => &palette.neighbor,
        };
        self.nodes.insert(
            id.to_string(),
            ArtifactNode {
                id: id.to_string(),
                label: id.to_string(),
                title: format!("Protein: {}", id),
                color: color.clone(),
                font: NodeFont {
                    size: palette.font_size,
                    color: palette.font_color.clone(),
                },
                role,
            },
        );
        true
    }

    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        weight: f64,
        palette: &GraphPalette,
    ) -> DashboardResult<()> {
        if !self.nodes.contains_key(source) || !self.nodes.contains_key(target) {
            return Err(DashboardError::DanglingEdge {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        self.edges.push(ArtifactEdge {
            source: source.to_string(),
            target: target.to_string(),
            weight,
            title: format!("Weight: {:.4}", weight),
            color: palette.edge.clone(),
            width: weight * EDGE_WIDTH_SCALE,
        });
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&ArtifactNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ArtifactNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[ArtifactEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
