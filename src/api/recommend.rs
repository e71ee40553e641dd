//! Recommendation endpoint handler.

use crate::api::{ApiError, AppState, RecommendRequest};
use crate::logging::intent_preview;
use crate::pipeline::Recommendation;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// POST /api/recommend - Run the full pipeline for one request.
///
/// Bodies that fail to parse get the same `{"error": ...}` shape as
/// pipeline failures, without a kind header.
#[instrument(skip_all)]
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<Recommendation>, ApiError> {
    let Json(request) = payload.inspect_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected request body");
    })?;

    let constraints = request.to_constraints();
    info!(
        budget = ?request.budget_range,
        requires_4g = constraints.requires_connectivity,
        min_ram = ?constraints.min_ram,
        intent = ?intent_preview(
            &constraints.intent_text,
            state.config.logging.enable_content_logging
        ),
        "Recommendation request"
    );

    let recommendation = state.recommender.recommend(&constraints).await?;
    info!(
        device_id = recommendation.selected_device.id,
        confidence = recommendation.confidence_score,
        "Recommendation served"
    );
    Ok(Json(recommendation))
}
