//! # Metrics Collection Module
//!
//! Prometheus export for the recommendation pipeline, served at `GET /metrics`.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `advisor_recommendations_total{outcome}` - Finished requests by outcome
//!   (`success` or an error kind code)
//! - `advisor_training_runs_total` - Classifier training runs started
//! - `advisor_reasoning_attempts_total{result}` - Calls to the reasoning service
//!
//! **Histograms:**
//! - `advisor_recommendation_duration_seconds` - End-to-end request duration
//! - `advisor_training_duration_seconds` - Load, train and annotate duration
//!
//! **Gauges:**
//! - `advisor_cache_initialized` - 1 once the classifier is trained
//! - `advisor_catalog_size` - Devices in the annotated catalog

pub mod handler;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

use crate::pipeline::RecommendationCache;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;

/// Derives gauges from the shared cache and renders the exposition text.
pub struct MetricsCollector {
    cache: Arc<RecommendationCache>,
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(
        cache: Arc<RecommendationCache>,
        start_time: Instant,
        prometheus_handle: PrometheusHandle,
    ) -> Self {
        Self {
            cache,
            start_time,
            prometheus_handle,
        }
    }

    /// Refresh cache gauges. Never triggers initialization.
    pub fn update_cache_gauges(&self) {
        let catalog_size = self.cache.get().map(|s| s.catalog.len()).unwrap_or(0);
        metrics::gauge!("advisor_cache_initialized")
            .set(if self.cache.is_initialized() { 1.0 } else { 0.0 });
        metrics::gauge!("advisor_catalog_size").set(catalog_size as f64);
    }

    /// Seconds since server startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Initialize Prometheus metrics exporter with custom histogram buckets.
///
/// Request durations are dominated by the reasoning call, so buckets run
/// from 50 ms to 2 minutes. Training buckets cover sub-second toy catalogs up
/// to several minutes.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let request_buckets = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0];
    let training_buckets = &[0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("advisor_recommendation_duration_seconds".to_string()),
            request_buckets,
        )?
        .set_buckets_for_metric(
            Matcher::Full("advisor_training_duration_seconds".to_string()),
            training_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Install the global recorder, or hand back a detached handle when one is
/// already installed (tests, repeated router construction).
pub fn setup_metrics_or_detached() -> PrometheusHandle {
    setup_metrics().unwrap_or_else(|e| {
        tracing::debug!("Metrics already initialized, creating new handle: {}", e);
        PrometheusBuilder::new().build_recorder().handle()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, ClassifierConfig};
    use std::sync::{Mutex, Once};

    static INIT: Once = Once::new();
    static TEST_HANDLE: Mutex<Option<PrometheusHandle>> = Mutex::new(None);

    fn get_test_handle() -> PrometheusHandle {
        INIT.call_once(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            *TEST_HANDLE.lock().unwrap() = Some(recorder.handle());
            metrics::set_global_recorder(Box::new(recorder)).ok();
        });
        TEST_HANDLE.lock().unwrap().as_ref().unwrap().clone()
    }

    fn cold_cache() -> Arc<RecommendationCache> {
        Arc::new(RecommendationCache::new(
            CatalogConfig::default(),
            ClassifierConfig::default(),
        ))
    }

    #[test]
    fn test_metrics_collector_construction() {
        let collector = MetricsCollector::new(cold_cache(), Instant::now(), get_test_handle());
        assert!(collector.uptime_seconds() < 1);
    }

    #[test]
    fn test_cache_gauges_do_not_initialize() {
        let cache = cold_cache();
        let collector = MetricsCollector::new(Arc::clone(&cache), Instant::now(), get_test_handle());
        collector.update_cache_gauges();
        assert!(!cache.is_initialized());
        assert_eq!(cache.training_runs(), 0);
    }

    #[test]
    fn test_render_includes_recorded_counter() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let collector = MetricsCollector::new(cold_cache(), Instant::now(), recorder.handle());
        metrics::with_local_recorder(&recorder, || {
            metrics::counter!("advisor_recommendations_total", "outcome" => "success").increment(1);
        });
        let output = collector.render_metrics();
        assert!(output.contains("advisor_recommendations_total"));
        assert!(output.contains("outcome=\"success\""));
    }
}
