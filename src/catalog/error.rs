//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the training or evaluation split.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configured path does not exist.
    #[error("Data file not found at {0}")]
    NotFound(PathBuf),

    /// Path exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content does not follow the numeric table format.
    #[error("Malformed data in {path} at line {line}: {message}")]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A column required by the feature schema is absent.
    #[error("Column '{column}' missing from {path}")]
    MissingColumn { path: PathBuf, column: String },
}

impl CatalogError {
    /// True when the data could not be reached at all, as opposed to being
    /// present but unusable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CatalogError::NotFound(_) | CatalogError::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(CatalogError::NotFound(PathBuf::from("x.csv")).is_unavailable());
        assert!(!CatalogError::MissingColumn {
            path: PathBuf::from("x.csv"),
            column: "ram".to_string(),
        }
        .is_unavailable());
    }

    #[test]
    fn test_not_found_message_names_path() {
        let err = CatalogError::NotFound(PathBuf::from("model/data/train.csv"));
        assert_eq!(err.to_string(), "Data file not found at model/data/train.csv");
    }
}
