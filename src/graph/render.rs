//! HTML rendering of graph artifacts
//!
//! The page loads vis-network from a CDN and inlines the artifact as JSON,
//! so it can be served as-is, embedded in an iframe, or written to a file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::artifact::GraphArtifact;
use crate::error::DashboardResult;

const VIS_NETWORK_SCRIPT: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

/// Canvas size of the rendered graph, as CSS lengths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlRenderer {
    pub height: String,
    pub width: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            height: "600px".to_string(),
            width: "100%".to_string(),
        }
    }
}

/// JSON is inlined into a `<script>` element; `</` must not close it early
fn script_safe_json<T: Serialize>(value: &T) -> DashboardResult<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl HtmlRenderer {
    pub fn render(&self, artifact: &GraphArtifact, title: &str) -> DashboardResult<String> {
        let nodes: Vec<_> = artifact.nodes().collect();
        let nodes = script_safe_json(&nodes)?;
        let edges = script_safe_json(&artifact.edges())?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{script}"></script>
<style>
  #protein-graph {{ width: {width}; height: {height}; border: 1px solid lightgray; }}
</style>
</head>
<body>
<div id="protein-graph"></div>
<script>
  var nodes = new vis.DataSet({nodes});
  var edges = new vis.DataSet({edges});
  var container = document.getElementById("protein-graph");
  new vis.Network(container, {{ nodes: nodes, edges: edges }}, {{ edges: {{ smooth: false }} }});
</script>
</body>
</html>
"#,
            title = escape_html(title),
            script = VIS_NETWORK_SCRIPT,
            width = self.width,
            height = self.height,
            nodes = nodes,
            edges = edges,
        ))
    }

    /// Render into `path`, replacing whatever was there. Returns the path written.
    pub fn write(
        &self,
        artifact: &GraphArtifact,
        title: &str,
        path: impl AsRef<Path>,
    ) -> DashboardResult<PathBuf> {
        let html = self.render(artifact, title)?;
        std::fs::write(path.as_ref(), html)?;
        Ok(path.as_ref().to_path_buf())
    }
}
