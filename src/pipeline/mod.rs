//! Recommendation pipeline.
//!
//! Request flow: the cache is initialized on first use (load, train,
//! annotate), then constraints filter the annotated catalog, the selector
//! bounds the shortlist and the reasoning delegate picks one device.
//!
//! ```text
//! request ─▶ cache ─▶ filter ─▶ select ─▶ reason ─▶ Recommendation
//!              │         │                   │
//!              ▼         ▼                   ▼
//!      DataUnavailable  NoMatchingDevices  MissingCredential
//!      TrainingFailed                      ReasoningFailed
//! ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod selector;
pub mod types;

pub use cache::{CachedState, RecommendationCache};
pub use error::{ErrorKind, RecommendError};
pub use filter::{filter_devices, ConstraintFilter, DeviceFilter};
pub use selector::select_candidates;
pub use types::{
    AnnotatedDevice, Candidate, Recommendation, SelectedDevice, TierAnnotatedCatalog,
    UserConstraints, CANDIDATE_FIELDS,
};

use crate::config::AdvisorConfig;
use crate::logging::extract_outcome;
use crate::reasoning::ReasoningDelegate;
use std::sync::Arc;
use std::time::Instant;

/// Owns the shared cache and the reasoning delegate. Cheap to share behind
/// an `Arc`; every method takes `&self`.
pub struct Recommender {
    cache: Arc<RecommendationCache>,
    delegate: ReasoningDelegate,
    max_candidates: usize,
}

impl Recommender {
    pub fn new(
        cache: Arc<RecommendationCache>,
        delegate: ReasoningDelegate,
        max_candidates: usize,
    ) -> Self {
        Self {
            cache,
            delegate,
            max_candidates,
        }
    }

    /// Wire the pipeline from configuration. Nothing is loaded until the
    /// first request.
    pub fn from_config(config: &AdvisorConfig, client: reqwest::Client) -> Self {
        let cache = RecommendationCache::new(config.catalog.clone(), config.classifier.clone());
        let delegate = ReasoningDelegate::from_config(&config.reasoning, client)
            .with_content_logging(config.logging.enable_content_logging);

        Self::new(Arc::new(cache), delegate, config.selection.max_candidates)
    }

    pub fn cache(&self) -> &Arc<RecommendationCache> {
        &self.cache
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Filter and select without calling the reasoning service.
    pub async fn shortlist(
        &self,
        constraints: &UserConstraints,
    ) -> Result<Vec<Candidate>, RecommendError> {
        let state = self.cache.get_or_initialize().await?;
        let filtered = filter_devices(&state.catalog, constraints)?;
        Ok(select_candidates(
            &filtered,
            state.catalog.schema(),
            self.max_candidates,
        ))
    }

    /// Run the full pipeline for one request.
    pub async fn recommend(
        &self,
        constraints: &UserConstraints,
    ) -> Result<Recommendation, RecommendError> {
        let start = Instant::now();
        let result = self.run(constraints).await;

        let (outcome, error) = extract_outcome(&result);
        metrics::counter!("advisor_recommendations_total", "outcome" => outcome).increment(1);
        metrics::histogram!("advisor_recommendation_duration_seconds")
            .record(start.elapsed().as_secs_f64());

        if let Some(error) = error {
            tracing::warn!(kind = outcome, error = %error, "Recommendation failed");
        }
        result
    }

    async fn run(&self, constraints: &UserConstraints) -> Result<Recommendation, RecommendError> {
        let candidates = self.shortlist(constraints).await?;
        tracing::debug!(
            candidates = candidates.len(),
            ids = ?candidates.iter().map(|c| c.id).collect::<Vec<_>>(),
            "Shortlist selected"
        );
        self.delegate
            .recommend(&candidates, &constraints.intent_text)
            .await
    }
}
