//! External reasoning service configuration

use serde::{Deserialize, Serialize};

/// Google Generative Language API settings.
///
/// The key is normally read from the environment variable named by
/// `api_key_env`. An inline `api_key` takes precedence when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    /// Retry once on network errors, timeouts, 429 and 5xx
    pub retry_transient: bool,
    pub retry_backoff_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            timeout_seconds: 60,
            retry_transient: true,
            retry_backoff_ms: 500,
            temperature: None,
        }
    }
}

impl ReasoningConfig {
    /// Raw key from config or environment. Validity is judged by the delegate.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }
}
