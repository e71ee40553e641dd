//! Error types for classifier training and prediction.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ClassifierError {
    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Training set has no feature columns")]
    NoFeatures,

    #[error("Feature rows ({features}) and labels ({labels}) differ in length")]
    LabelCountMismatch { features: usize, labels: usize },

    /// A row does not match the width the model was fitted on.
    #[error("Row {row} has {found} features, expected {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}
