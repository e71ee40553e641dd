//! Configuration module for the advisor
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ADVISOR_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use advisor::config::AdvisorConfig;
//!
//! // Load defaults
//! let config = AdvisorConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [classifier]
//! n_estimators = 25
//! "#;
//! let config: AdvisorConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.classifier.n_estimators, 25);
//! ```

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod logging;
pub mod reasoning;
pub mod server;

pub use catalog::CatalogConfig;
pub use classifier::ClassifierConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use reasoning::ReasoningConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shortlist settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Number of candidates forwarded to the reasoning step
    pub max_candidates: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { max_candidates: 5 }
    }
}

/// Unified configuration for the advisor.
///
/// # Example
///
/// ```rust
/// use advisor::config::AdvisorConfig;
///
/// let config = AdvisorConfig::default();
/// assert_eq!(config.selection.max_candidates, 5);
/// assert_eq!(config.classifier.seed, 42);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdvisorConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Training and evaluation data locations
    pub catalog: CatalogConfig,
    /// Forest hyperparameters
    pub classifier: ClassifierConfig,
    /// Shortlist settings
    pub selection: SelectionConfig,
    /// External reasoning service
    pub reasoning: ReasoningConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AdvisorConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports ADVISOR_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("ADVISOR_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("ADVISOR_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("ADVISOR_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ADVISOR_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(path) = std::env::var("ADVISOR_TRAIN_PATH") {
            self.catalog.train_path = path.into();
        }
        if let Ok(path) = std::env::var("ADVISOR_EVAL_PATH") {
            self.catalog.eval_path = path.into();
        }
        if let Ok(n) = std::env::var("ADVISOR_MAX_CANDIDATES") {
            if let Ok(n) = n.parse() {
                self.selection.max_candidates = n;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.catalog.train_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                field: "catalog.train_path".to_string(),
                message: "path cannot be empty".to_string(),
            });
        }
        if self.catalog.eval_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                field: "catalog.eval_path".to_string(),
                message: "path cannot be empty".to_string(),
            });
        }

        if self.classifier.n_estimators == 0 {
            return Err(ConfigError::Validation {
                field: "classifier.n_estimators".to_string(),
                message: "forest needs at least one tree".to_string(),
            });
        }

        if self.selection.max_candidates == 0 {
            return Err(ConfigError::Validation {
                field: "selection.max_candidates".to_string(),
                message: "shortlist must hold at least one device".to_string(),
            });
        }

        if self.reasoning.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "reasoning.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
