//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ready` once the classifier is trained, `cold` before the first request
    pub status: String,
    pub uptime_seconds: u64,
    pub catalog_size: usize,
    pub training_runs: usize,
}

/// GET /health - Report cache state without triggering training.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cache = state.recommender.cache();
    let catalog_size = cache.get().map(|s| s.catalog.len()).unwrap_or(0);

    Json(HealthResponse {
        status: if cache.is_initialized() { "ready" } else { "cold" }.to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        catalog_size,
        training_runs: cache.training_runs(),
    })
}
