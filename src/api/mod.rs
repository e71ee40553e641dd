//! # Recommendation API
//!
//! Thin HTTP wrapper around the [`Recommender`](crate::pipeline::Recommender).
//!
//! ## Endpoints
//!
//! - `POST /api/recommend` - Run the pipeline for one set of constraints
//! - `GET /health` - Cache state and uptime
//! - `GET /metrics` - Prometheus exposition text
//!
//! ## Example
//!
//! ```no_run
//! use advisor::api::{create_router, AppState};
//! use advisor::config::AdvisorConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(AdvisorConfig::default());
//! let state = Arc::new(AppState::new(config)?);
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every pipeline failure is HTTP 400 with a single message field; the kind
//! is in the `x-advisor-error-kind` header:
//! ```json
//! { "error": "No devices found matching strict criteria." }
//! ```
//!
//! Unparsable bodies are 400 and requests past the server deadline are 408,
//! both with the same body shape and no kind header.

pub mod headers;
mod health;
mod recommend;
pub mod types;

pub use health::HealthResponse;
pub use types::*;

use crate::config::AdvisorConfig;
use crate::metrics::MetricsCollector;
use crate::pipeline::Recommender;
use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    middleware,
    routing::{get, post},
    BoxError, Json, Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Maximum request body size (64 KB).
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<AdvisorConfig>,
    pub recommender: Arc<Recommender>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Build the pipeline from configuration.
    pub fn new(config: Arc<AdvisorConfig>) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.server.request_timeout_seconds))
            .pool_max_idle_per_host(10)
            .build()?;

        let recommender = Arc::new(Recommender::from_config(&config, http_client));
        Ok(Self::with_recommender(config, recommender))
    }

    /// Use an already wired recommender (tests, alternative agents).
    pub fn with_recommender(config: Arc<AdvisorConfig>, recommender: Arc<Recommender>) -> Self {
        let start_time = Instant::now();
        let prometheus_handle = crate::metrics::setup_metrics_or_detached();
        let metrics_collector = Arc::new(MetricsCollector::new(
            Arc::clone(recommender.cache()),
            start_time,
            prometheus_handle,
        ));

        Self {
            config,
            recommender,
            start_time,
            metrics_collector,
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/api/recommend", post(recommend::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(timeout)),
        )
        .layer(middleware::from_fn(crate::logging::request_id))
        .with_state(state)
}

/// Turn a request deadline into `408` with the usual `{"error": ...}` body.
async fn handle_timeout(err: BoxError) -> (StatusCode, Json<ApiError>) {
    if err.is::<Elapsed>() {
        tracing::warn!("Request exceeded server timeout");
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(ApiError::bad_request("Request timed out")),
        )
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::bad_request("Internal server error")),
        )
    }
}
