//! Google Generative Language API agent.

use super::{AgentError, ReasoningAgent};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest upstream error message carried into [`AgentError::Upstream`].
const MAX_UPSTREAM_MESSAGE: usize = 200;

/// Talks to `POST {base_url}/v1beta/models/{model}:generateContent`.
///
/// The key travels in the `x-goog-api-key` header, never in the URL, so it
/// cannot surface in transport error messages.
///
/// The prompt is sent as a single user turn; the text parts of the first
/// candidate are concatenated into the reply.
pub struct GeminiAgent {
    /// Base URL (e.g., "https://generativelanguage.googleapis.com")
    base_url: String,
    model: String,
    temperature: Option<f32>,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Client,
}

impl GeminiAgent {
    pub fn new(base_url: String, model: String, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            temperature: None,
            timeout: Duration::from_secs(60),
            client,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, prompt: &str) -> GoogleRequest {
        GoogleRequest {
            contents: vec![GoogleContent {
                role: "user".to_string(),
                parts: vec![GooglePart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.temperature.map(|t| GoogleGenerationConfig {
                temperature: Some(t),
            }),
        }
    }

    fn extract_text(response: GoogleResponse) -> Result<String, AgentError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::InvalidResponse("response has no candidates".to_string()))?;

        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<String>>()
            .join("");

        if text.trim().is_empty() {
            return Err(AgentError::InvalidResponse(format!(
                "empty completion (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

#[async_trait]
impl ReasoningAgent for GeminiAgent {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, AgentError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&self.build_request(prompt))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    AgentError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %error_body, "generateContent error body");
            return Err(AgentError::Upstream {
                status: status.as_u16(),
                message: summarize_error_body(&error_body, status),
            });
        }

        let body: GoogleResponse = response.json().await.map_err(|e| {
            AgentError::InvalidResponse(format!("Failed to parse generateContent response: {}", e))
        })?;

        Self::extract_text(body)
    }
}

/// Short reason for a failed call: the `error.message` of Google's error
/// envelope when present, otherwise the raw body, capped in length.
fn summarize_error_body(body: &str, status: reqwest::StatusCode) -> String {
    let message = serde_json::from_str::<GoogleErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| body.trim().to_string());

    if message.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string();
    }
    if message.chars().count() > MAX_UPSTREAM_MESSAGE {
        let truncated: String = message.chars().take(MAX_UPSTREAM_MESSAGE).collect();
        return format!("{}...", truncated);
    }
    message
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: Option<String>,
}

/// Google Generative AI request format
#[derive(Debug, Serialize)]
struct GoogleRequest {
    contents: Vec<GoogleContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "generationConfig")]
    generation_config: Option<GoogleGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GoogleContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GooglePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GooglePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GoogleGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Google Generative AI response format
#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Debug, Deserialize)]
struct GoogleCandidate {
    content: GoogleContent,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}
