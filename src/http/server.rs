//! HTTP server for the protein dashboard

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use super::handler::{
    count_documents_handler, ec_stats_handler, neighbors_handler, protein_graph_handler,
    protein_graph_page_handler, sample_graph_handler, sample_graph_page_handler,
    search_documents_handler, search_graph_handler, sequence_lengths_handler, status_handler,
};
use crate::config::HttpConfig;
use crate::dashboard::ProteinDashboard;

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

async fn static_handler() -> Response {
    match Assets::get("index.html") {
        Some(index_html) => {
            Html(String::from_utf8_lossy(index_html.data.as_ref()).into_owned()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "index.html not bundled").into_response(),
    }
}

/// All dashboard routes over a shared dashboard
pub fn build_router(dashboard: Arc<ProteinDashboard>) -> Router {
    Router::new()
        .route("/", get(static_handler))
        .route("/api/documents/search", get(search_documents_handler))
        .route("/api/documents/count", get(count_documents_handler))
        .route("/api/graph/search", get(search_graph_handler))
        .route("/api/graph/neighbors/:entry", get(neighbors_handler))
        .route("/api/graph/protein/:entry", get(protein_graph_handler))
        .route("/api/graph/sample", get(sample_graph_handler))
        .route("/graph/protein/:entry", get(protein_graph_page_handler))
        .route("/graph/sample", get(sample_graph_page_handler))
        .route("/api/stats/ec", get(ec_stats_handler))
        .route("/api/stats/sequence-lengths", get(sequence_lengths_handler))
        .route("/api/status", get(status_handler))
        .layer(CorsLayer::permissive())
        .with_state(dashboard)
}

/// HTTP server managing the dashboard API and static assets
pub struct HttpServer {
    dashboard: Arc<ProteinDashboard>,
    config: HttpConfig,
}

impl HttpServer {
    pub fn new(dashboard: Arc<ProteinDashboard>, config: HttpConfig) -> Self {
        Self { dashboard, config }
    }

    /// Bind and serve until the process exits
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = build_router(Arc::clone(&self.dashboard));

        let addr = format!("{}:{}", self.config.address, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Dashboard available at http://{}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
