//! Shared test utilities for advisor integration tests.
//!
//! Provides CSV catalog fixtures, a scripted reasoning agent, and helpers
//! for wiring a recommender or router around them.

#![allow(dead_code)]

use advisor::api::{create_router, AppState};
use advisor::config::{AdvisorConfig, CatalogConfig, ClassifierConfig, ReasoningConfig};
use advisor::pipeline::{RecommendationCache, Recommender};
use advisor::reasoning::{AgentError, ReasoningAgent, ReasoningDelegate};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Well-Known Test Constants
// =============================================================================

/// Environment variable that is never set, so no ambient key leaks in.
pub const UNSET_KEY_ENV: &str = "ADVISOR_TEST_KEY_NEVER_SET";

pub const TRAIN_ROWS_PER_TIER: usize = 40;
pub const EVAL_ROWS: usize = 40;

const COLUMNS: &str =
    "battery_power,clock_speed,four_g,int_memory,mobile_wt,n_cores,px_height,px_width,ram,talk_time";

// =============================================================================
// Catalog Fixtures
// =============================================================================

/// Feature row whose tier is driven by RAM; other columns vary slowly.
fn feature_row(tier: usize, k: usize) -> String {
    let ram = 500 + tier * 1000 + (k * 37) % 700;
    format!(
        "{},{:.1},{},{},{},{},{},{},{},{}",
        800 + (k * 53) % 1200,
        0.5 + ((k * 7) % 25) as f64 / 10.0,
        usize::from(k % 3 != 0),
        4 + (k * 11) % 60,
        90 + (k * 13) % 110,
        1 + k % 8,
        300 + (k * 29) % 1400,
        600 + (k * 31) % 1300,
        ram,
        2 + k % 19,
    )
}

/// Write `train.csv` and `test.csv` into `dir` and return a matching config.
///
/// Evaluation rows cycle through the four tiers; ids start at 1.
pub fn write_catalog(dir: &Path) -> CatalogConfig {
    let train = dir.join("train.csv");
    let eval = dir.join("test.csv");

    let mut train_csv = format!("{},price_range\n", COLUMNS);
    for tier in 0..4 {
        for k in 0..TRAIN_ROWS_PER_TIER {
            train_csv.push_str(&format!("{},{}\n", feature_row(tier, k), tier));
        }
    }

    let mut eval_csv = format!("id,{}\n", COLUMNS);
    for i in 0..EVAL_ROWS {
        eval_csv.push_str(&format!("{},{}\n", i + 1, feature_row(i % 4, i + 5)));
    }

    std::fs::write(&train, train_csv).unwrap();
    std::fs::write(&eval, eval_csv).unwrap();

    CatalogConfig {
        train_path: train,
        eval_path: eval,
        ..Default::default()
    }
}

/// Small forest so tests stay fast.
pub fn test_classifier_config() -> ClassifierConfig {
    ClassifierConfig {
        n_estimators: 15,
        ..Default::default()
    }
}

/// Full config pointing at the given catalog, with no ambient credential.
pub fn test_config(catalog: CatalogConfig) -> AdvisorConfig {
    let mut config = AdvisorConfig::default();
    config.catalog = catalog;
    config.classifier = test_classifier_config();
    config.reasoning = ReasoningConfig {
        api_key_env: UNSET_KEY_ENV.to_string(),
        retry_backoff_ms: 10,
        timeout_seconds: 5,
        ..Default::default()
    };
    config
}

// =============================================================================
// Scripted Agent
// =============================================================================

/// Reasoning agent that answers from a script, then by picking the first
/// candidate in the prompt once the script is exhausted.
pub struct ScriptedAgent {
    replies: Mutex<VecDeque<Result<String, AgentError>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedAgent {
    pub fn new(replies: Vec<Result<String, AgentError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Agent that always picks the first candidate.
    pub fn first_candidate() -> Arc<Self> {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ReasoningAgent for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, _api_key: &str) -> Result<String, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        let id = first_candidate_id(prompt)
            .ok_or_else(|| AgentError::InvalidResponse("no candidate in prompt".to_string()))?;
        Ok(recommendation_json(id, 0.85))
    }
}

/// Id of the first candidate in a prompt built by the delegate.
pub fn first_candidate_id(prompt: &str) -> Option<i64> {
    let start = prompt.find("{\"id\":")? + 6;
    let digits: String = prompt[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '-')
        .collect();
    digits.parse().ok()
}

/// Well-formed model answer selecting `id`.
pub fn recommendation_json(id: i64, confidence: f64) -> String {
    serde_json::json!({
        "recommendation_id": format!("rec_{}", id),
        "user_intent": "test intent",
        "selected_device": { "id": id, "name": format!("Device {}", id) },
        "confidence_score": confidence,
        "reasoning": "Best specs for the stated intent."
    })
    .to_string()
}

// =============================================================================
// Wiring
// =============================================================================

/// Recommender around `agent`, with `key` as the configured credential.
pub fn recommender(
    config: &AdvisorConfig,
    agent: Arc<ScriptedAgent>,
    key: Option<&str>,
) -> Recommender {
    let cache = RecommendationCache::new(config.catalog.clone(), config.classifier.clone());
    let delegate = ReasoningDelegate::new(agent, key.map(String::from))
        .with_retry(true, Duration::from_millis(10));
    Recommender::new(Arc::new(cache), delegate, config.selection.max_candidates)
}

/// Router and state around a scripted recommender.
pub fn test_app(
    config: AdvisorConfig,
    agent: Arc<ScriptedAgent>,
    key: Option<&str>,
) -> (axum::Router, Arc<AppState>) {
    let recommender = Arc::new(recommender(&config, agent, key));
    let state = Arc::new(AppState::with_recommender(Arc::new(config), recommender));
    (create_router(Arc::clone(&state)), state)
}
