//! Recommendation Cache - single-flight, lazily built classifier and
//! annotated catalog.
//!
//! The first caller starts catalog loading, training and annotation on the
//! blocking pool; concurrent callers wait on the same [`OnceCell`] and
//! receive the same `Arc`. The build task is owned by the cache, not by the
//! caller: if the caller that started it is cancelled, the next caller
//! awaits the same task instead of starting another. A failed build stores
//! nothing, so the next call tries again.

use super::{RecommendError, TierAnnotatedCatalog};
use crate::catalog::CatalogStore;
use crate::classifier::TierClassifier;
use crate::config::{CatalogConfig, ClassifierConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;

type BuildTask = JoinHandle<Result<CachedState, RecommendError>>;

/// Trained model and the catalog it annotated. Never mutated after build.
#[derive(Debug)]
pub struct CachedState {
    pub classifier: TierClassifier,
    pub catalog: TierAnnotatedCatalog,
}

pub struct RecommendationCache {
    store: CatalogStore,
    classifier_config: ClassifierConfig,
    state: OnceCell<Arc<CachedState>>,
    /// Build in progress; survives cancellation of the caller that spawned it
    in_flight: Mutex<Option<(BuildTask, Instant)>>,
    training_runs: Arc<AtomicUsize>,
}

impl RecommendationCache {
    pub fn new(catalog: CatalogConfig, classifier: ClassifierConfig) -> Self {
        Self {
            store: CatalogStore::new(catalog),
            classifier_config: classifier,
            state: OnceCell::new(),
            in_flight: Mutex::new(None),
            training_runs: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Return the cached state, building it on first use.
    pub async fn get_or_initialize(&self) -> Result<Arc<CachedState>, RecommendError> {
        self.state
            .get_or_try_init(|| self.initialize())
            .await
            .map(Arc::clone)
    }

    /// Cached state without triggering initialization.
    pub fn get(&self) -> Option<Arc<CachedState>> {
        self.state.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized()
    }

    /// Number of times classifier training has started in this process.
    pub fn training_runs(&self) -> usize {
        self.training_runs.load(Ordering::SeqCst)
    }

    async fn initialize(&self) -> Result<Arc<CachedState>, RecommendError> {
        // Initializers are serialized by the OnceCell, so this lock is never
        // contended; holding it across the await keeps the task in place if
        // this caller is dropped.
        let mut in_flight = self.in_flight.lock().await;

        let (task, start) = in_flight.get_or_insert_with(|| {
            tracing::info!(
                "Initializing recommendation cache: loading catalog and training classifier"
            );
            let store = self.store.clone();
            let config = self.classifier_config.clone();
            let runs = Arc::clone(&self.training_runs);
            let task = tokio::task::spawn_blocking(move || build_state(&store, &config, &runs));
            (task, Instant::now())
        });
        let start = *start;
        let joined = task.await;
        *in_flight = None;

        let result = joined
            .map_err(|e| RecommendError::TrainingFailed(format!("training task aborted: {}", e)))
            .and_then(|r| r);

        match result {
            Ok(state) => {
                let elapsed = start.elapsed();
                metrics::histogram!("advisor_training_duration_seconds")
                    .record(elapsed.as_secs_f64());
                tracing::info!(
                    devices = state.catalog.len(),
                    estimators = state.classifier.n_estimators(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Classifier trained and catalog annotated"
                );
                Ok(Arc::new(state))
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind().as_str(), "Cache initialization failed");
                Err(e)
            }
        }
    }
}

/// Load, train and annotate synchronously.
///
/// `training_runs` is bumped once the data has loaded and fitting begins.
pub fn build_state(
    store: &CatalogStore,
    config: &ClassifierConfig,
    training_runs: &AtomicUsize,
) -> Result<CachedState, RecommendError> {
    let data = store.load()?;

    training_runs.fetch_add(1, Ordering::SeqCst);
    metrics::counter!("advisor_training_runs_total").increment(1);

    let classifier =
        TierClassifier::train(&data.training.features, &data.training.labels, config)?;

    let rows: Vec<Vec<f64>> = data
        .evaluation
        .iter()
        .map(|r| r.features.clone())
        .collect();
    let tiers = classifier.predict(&rows)?;

    let catalog = TierAnnotatedCatalog::new(data.schema, data.evaluation, tiers);
    Ok(CachedState {
        classifier,
        catalog,
    })
}
