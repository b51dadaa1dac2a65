//! Graph Builder
//!
//! Turns `(source, target, weight)` edges from the graph store into a
//! node/edge visualization artifact:
//! - nodes de-duplicated by protein id, colored focal / neighbor
//! - edges labeled with their weight and scaled in width by it
//!
//! The artifact is an in-memory value; `HtmlRenderer` turns it into a page.

pub mod artifact;
pub mod builder;
pub mod render;

pub use artifact::{
    ArtifactEdge, ArtifactNode, GraphArtifact, GraphPalette, NodeFont, NodeRole, EDGE_WIDTH_SCALE,
};
pub use builder::{validate_limit, GraphBuilder};
pub use render::HtmlRenderer;
