//! Error types for calls to the external reasoning service.

use thiserror::Error;

/// Errors that can occur while talking to the language model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Service returned an error response (4xx, 5xx).
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Response doesn't match the expected envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AgentError {
    /// Worth one more attempt: connectivity problems, timeouts, throttling
    /// and server-side failures.
    pub fn is_transient(&self) -> bool {
        match self {
            AgentError::Network(_) | AgentError::Timeout(_) => true,
            AgentError::Upstream { status, .. } => *status == 429 || *status >= 500,
            AgentError::InvalidResponse(_) => false,
        }
    }
}
