//! Request-level error taxonomy for the recommendation pipeline.

use crate::catalog::CatalogError;
use crate::classifier::ClassifierError;
use serde::Serialize;
use thiserror::Error;

/// Every way a recommendation request can end without a result.
///
/// `DataUnavailable` and `TrainingFailed` come from cache initialization and
/// recur on every request until the data is fixed. The others are per request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// Training or evaluation data could not be reached.
    #[error("Catalog data unavailable: {0}")]
    DataUnavailable(String),

    /// Data was present but could not be turned into an annotated catalog.
    #[error("System initialization failed: {0}")]
    TrainingFailed(String),

    /// Constraints excluded every device.
    #[error("No devices found matching strict criteria.")]
    NoMatchingDevices,

    /// No usable key for the reasoning service.
    #[error("No valid API key configured for the reasoning service")]
    MissingCredential,

    /// The reasoning call failed or returned something off-contract.
    #[error("LLM processing failed: {0}")]
    ReasoningFailed(String),
}

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DataUnavailable,
    TrainingFailed,
    NoMatchingDevices,
    MissingCredential,
    ReasoningFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::DataUnavailable => "data_unavailable",
            ErrorKind::TrainingFailed => "training_failed",
            ErrorKind::NoMatchingDevices => "no_matching_devices",
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::ReasoningFailed => "reasoning_failed",
        }
    }
}

impl RecommendError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecommendError::DataUnavailable(_) => ErrorKind::DataUnavailable,
            RecommendError::TrainingFailed(_) => ErrorKind::TrainingFailed,
            RecommendError::NoMatchingDevices => ErrorKind::NoMatchingDevices,
            RecommendError::MissingCredential => ErrorKind::MissingCredential,
            RecommendError::ReasoningFailed(_) => ErrorKind::ReasoningFailed,
        }
    }
}

impl From<CatalogError> for RecommendError {
    fn from(err: CatalogError) -> Self {
        if err.is_unavailable() {
            RecommendError::DataUnavailable(err.to_string())
        } else {
            RecommendError::TrainingFailed(err.to_string())
        }
    }
}

impl From<ClassifierError> for RecommendError {
    fn from(err: ClassifierError) -> Self {
        RecommendError::TrainingFailed(err.to_string())
    }
}
