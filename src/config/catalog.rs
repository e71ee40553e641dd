//! Catalog data locations

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the labeled training split and the unlabeled evaluation split live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub train_path: PathBuf,
    pub eval_path: PathBuf,
    /// Training column holding the price tier
    pub label_column: String,
    /// Evaluation column holding the device identifier, if present
    pub id_column: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from("model/data/train.csv"),
            eval_path: PathBuf::from("model/data/test.csv"),
            label_column: "price_range".to_string(),
            id_column: "id".to_string(),
        }
    }
}
