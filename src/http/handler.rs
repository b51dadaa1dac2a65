//! HTTP handlers for the dashboard API

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::dashboard::ProteinDashboard;
use crate::error::{DashboardError, DashboardResult};
use crate::graph::GraphArtifact;
use crate::model::ProteinFilter;
use crate::stats::{LengthHistogram, DEFAULT_BIN_WIDTH};

pub type AppState = Arc<ProteinDashboard>;

/// Unparseable query strings become `InvalidInput`, so they get the JSON error body
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> DashboardResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| DashboardError::invalid_input(rejection.body_text()))
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DashboardError::Connectivity { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::Decode { .. } | DashboardError::InvalidEdgeWeight { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Text-box inputs of the search forms; empty boxes impose no constraint
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub entry: Option<String>,
    pub interpro: Option<String>,
    pub ec_number: Option<String>,
}

impl From<SearchParams> for ProteinFilter {
    fn from(params: SearchParams) -> Self {
        ProteinFilter::from_inputs(params.entry, params.interpro, params.ec_number)
    }
}

#[derive(Debug, Deserialize)]
pub struct SampleParams {
    pub limit: Option<i64>,
}

impl SampleParams {
    fn limit(&self) -> DashboardResult<i64> {
        self.limit
            .ok_or_else(|| DashboardError::invalid_input("limit is required"))
    }
}

#[derive(Debug, Deserialize)]
pub struct HistogramParams {
    pub bin_width: Option<usize>,
}

pub async fn search_documents_handler(
    State(dashboard): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> DashboardResult<impl IntoResponse> {
    let params = query_params(params)?;
    let records = dashboard.search(&params.into()).await?;
    Ok(Json(records))
}

pub async fn count_documents_handler(
    State(dashboard): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> DashboardResult<impl IntoResponse> {
    let params = query_params(params)?;
    let count = dashboard.count(&params.into()).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn search_graph_handler(
    State(dashboard): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> DashboardResult<impl IntoResponse> {
    let params = query_params(params)?;
    let proteins = dashboard.search_graph(&params.into()).await?;
    Ok(Json(proteins))
}

pub async fn neighbors_handler(
    State(dashboard): State<AppState>,
    Path(entry): Path<String>,
) -> DashboardResult<impl IntoResponse> {
    let neighbors = dashboard.neighbors(&entry).await?;
    Ok(Json(json!({ "entry": entry, "neighbors": neighbors })))
}

pub async fn protein_graph_handler(
    State(dashboard): State<AppState>,
    Path(entry): Path<String>,
) -> DashboardResult<Json<GraphArtifact>> {
    Ok(Json(dashboard.build_graph_for(&entry).await?))
}

pub async fn sample_graph_handler(
    State(dashboard): State<AppState>,
    params: Result<Query<SampleParams>, QueryRejection>,
) -> DashboardResult<Json<GraphArtifact>> {
    let params = query_params(params)?;
    Ok(Json(dashboard.build_graph_sample(params.limit()?).await?))
}

pub async fn protein_graph_page_handler(
    State(dashboard): State<AppState>,
    Path(entry): Path<String>,
) -> DashboardResult<Html<String>> {
    let artifact = dashboard.build_graph_for(&entry).await?;
    let title = format!("Protein Graph for Entry: {}", entry);
    Ok(Html(dashboard.renderer().render(&artifact, &title)?))
}

pub async fn sample_graph_page_handler(
    State(dashboard): State<AppState>,
    params: Result<Query<SampleParams>, QueryRejection>,
) -> DashboardResult<Html<String>> {
    let params = query_params(params)?;
    let limit = params.limit()?;
    let artifact = dashboard.build_graph_sample(limit).await?;
    let title = format!("Protein Graph with {} Connections", limit);
    Ok(Html(dashboard.renderer().render(&artifact, &title)?))
}

pub async fn ec_stats_handler(
    State(dashboard): State<AppState>,
) -> DashboardResult<impl IntoResponse> {
    let distribution = dashboard.ec_category_distribution().await?;
    let shares: serde_json::Map<String, serde_json::Value> = distribution
        .iter()
        .map(|(category, _)| (category.label().to_string(), json!(distribution.share(category))))
        .collect();

    Ok(Json(json!({
        "total": distribution.total(),
        "counts": distribution,
        "shares": shares,
    })))
}

pub async fn sequence_lengths_handler(
    State(dashboard): State<AppState>,
    params: Result<Query<HistogramParams>, QueryRejection>,
) -> DashboardResult<impl IntoResponse> {
    let params = query_params(params)?;
    let bin_width = params.bin_width.unwrap_or(DEFAULT_BIN_WIDTH);
    if bin_width == 0 {
        return Err(DashboardError::invalid_input("histogram bin width must be positive"));
    }

    let lengths = dashboard.sequence_length_distribution().await?;
    let histogram = LengthHistogram::from_lengths(&lengths, bin_width)?;
    Ok(Json(json!({
        "lengths": lengths,
        "histogram": histogram,
    })))
}

/// Handler for system status
pub async fn status_handler(
    State(dashboard): State<AppState>,
) -> DashboardResult<impl IntoResponse> {
    Ok(Json(dashboard.status().await?))
}
