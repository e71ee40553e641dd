//! Reasoning Delegate - asks a language model to pick one device from the
//! shortlist and enforces the JSON contract on its answer.
//!
//! The external service sits behind [`ReasoningAgent`] so the delegate's
//! credential check, timeout, retry and parsing rules apply to any backend.
//!
//! # Failure handling
//!
//! - No usable key: `MissingCredential`, before any call is made
//! - Transport failure, timeout, 429/5xx: one retry after a short backoff,
//!   then `ReasoningFailed`
//! - 4xx or off-contract output: `ReasoningFailed` immediately

pub mod error;
pub mod google;
pub mod parse;
pub mod prompt;

pub use error::AgentError;
pub use google::GeminiAgent;
pub use parse::{parse_recommendation, strip_code_fences};
pub use prompt::build_prompt;

use crate::config::ReasoningConfig;
use crate::pipeline::{Candidate, Recommendation, RecommendError};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Placeholder shipped in sample configs; never a real key.
const PLACEHOLDER_KEY: &str = "YOUR_GOOGLE_GEMINI_API_KEY";

/// A text-in, text-out language model endpoint.
///
/// # Cancellation Safety
///
/// Dropping the returned future aborts any in-flight HTTP request.
#[async_trait]
pub trait ReasoningAgent: Send + Sync + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Send one prompt and return the raw completion text.
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, AgentError>;
}

pub struct ReasoningDelegate {
    agent: Arc<dyn ReasoningAgent>,
    credential: Option<String>,
    timeout: Duration,
    retry_transient: bool,
    retry_backoff: Duration,
    content_logging: bool,
}

impl ReasoningDelegate {
    pub fn new(agent: Arc<dyn ReasoningAgent>, credential: Option<String>) -> Self {
        Self {
            agent,
            credential,
            timeout: Duration::from_secs(60),
            retry_transient: true,
            retry_backoff: Duration::from_millis(500),
            content_logging: false,
        }
    }

    /// Delegate backed by the Gemini API, with the key resolved from config.
    pub fn from_config(config: &ReasoningConfig, client: reqwest::Client) -> Self {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let agent = GeminiAgent::new(config.base_url.clone(), config.model.clone(), client)
            .with_temperature(config.temperature)
            .with_timeout(timeout);

        Self::new(Arc::new(agent), config.resolve_api_key())
            .with_timeout(timeout)
            .with_retry(config.retry_transient, Duration::from_millis(config.retry_backoff_ms))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, enabled: bool, backoff: Duration) -> Self {
        self.retry_transient = enabled;
        self.retry_backoff = backoff;
        self
    }

    pub fn with_content_logging(mut self, enabled: bool) -> Self {
        self.content_logging = enabled;
        self
    }

    /// The configured key, if it is usable.
    fn credential(&self) -> Option<&str> {
        self.credential
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != PLACEHOLDER_KEY)
    }

    pub fn has_credential(&self) -> bool {
        self.credential().is_some()
    }

    /// Pick one device from `candidates` for `intent`.
    pub async fn recommend(
        &self,
        candidates: &[Candidate],
        intent: &str,
    ) -> Result<Recommendation, RecommendError> {
        let api_key = self.credential().ok_or(RecommendError::MissingCredential)?;

        let prompt = build_prompt(intent, candidates).map_err(|e| {
            RecommendError::ReasoningFailed(format!("failed to encode candidates: {}", e))
        })?;

        let raw = self
            .generate_with_retry(&prompt, api_key)
            .await
            .map_err(|e| RecommendError::ReasoningFailed(e.to_string()))?;

        if self.content_logging {
            tracing::debug!(response = %raw, "Raw reasoning response");
        }

        let recommendation = parse_recommendation(&raw, candidates)?;
        tracing::info!(
            agent = self.agent.name(),
            device_id = recommendation.selected_device.id,
            confidence = recommendation.confidence_score,
            "Reasoning step selected a device"
        );
        Ok(recommendation)
    }

    async fn generate_with_retry(&self, prompt: &str, api_key: &str) -> Result<String, AgentError> {
        let attempts = if self.retry_transient { 2 } else { 1 };
        let timeout_ms = self.timeout.as_millis() as u64;

        let mut attempt = 1;
        loop {
            let outcome =
                match tokio::time::timeout(self.timeout, self.agent.generate(prompt, api_key)).await {
                    Ok(result) => result,
                    Err(_) => Err(AgentError::Timeout(timeout_ms)),
                };

            match outcome {
                Ok(text) => {
                    metrics::counter!("advisor_reasoning_attempts_total", "result" => "success")
                        .increment(1);
                    return Ok(text);
                }
                Err(e) => {
                    let transient = e.is_transient();
                    metrics::counter!(
                        "advisor_reasoning_attempts_total",
                        "result" => if transient { "transient_error" } else { "error" }
                    )
                    .increment(1);

                    if !transient || attempt == attempts {
                        tracing::warn!(agent = self.agent.name(), attempt, error = %e, "Reasoning call failed");
                        return Err(e);
                    }

                    tracing::warn!(
                        agent = self.agent.name(),
                        attempt,
                        error = %e,
                        backoff_ms = self.retry_backoff.as_millis() as u64,
                        "Transient reasoning failure, retrying"
                    );
                    tokio::time::sleep(self.retry_backoff).await;
                    attempt += 1;
                }
            }
        }
    }
}
