//! Catalog Store - loads the labeled training split and the unlabeled
//! evaluation split from disk.
//!
//! Evaluation columns are matched to the training feature schema by name.
//! An identifier column, when present, is kept on the record but never fed
//! to the classifier.

mod error;
mod schema;
mod table;

pub use error::CatalogError;
pub use schema::{Schema, FOUR_G_COLUMN, RAM_COLUMN};
pub use table::Table;

use crate::config::CatalogConfig;
use std::path::Path;

/// One evaluation-split device.
///
/// `features` is aligned with [`Schema::feature_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRecord {
    pub id: i64,
    pub features: Vec<f64>,
}

impl DeviceRecord {
    pub fn value(&self, index: usize) -> Option<f64> {
        self.features.get(index).copied()
    }
}

/// Labeled rows used to fit the classifier.
#[derive(Debug, Clone)]
pub struct TrainingSplit {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<i64>,
}

/// Both splits plus the schema they share.
#[derive(Debug, Clone)]
pub struct CatalogData {
    pub schema: Schema,
    pub training: TrainingSplit,
    pub evaluation: Vec<DeviceRecord>,
}

/// Reads catalog data from the configured locations.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    config: CatalogConfig,
}

impl CatalogStore {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Load both splits.
    ///
    /// Missing or unreadable files are reported before any parsing happens so
    /// that availability problems are never masked by format problems.
    pub fn load(&self) -> Result<CatalogData, CatalogError> {
        let train_path = &self.config.train_path;
        let eval_path = &self.config.eval_path;

        for path in [train_path, eval_path] {
            if !path.exists() {
                return Err(CatalogError::NotFound(path.clone()));
            }
        }

        let train = Table::read(train_path)?;
        let eval = Table::read(eval_path)?;

        let (schema, training) = self.training_split(&train, train_path)?;
        let (schema, evaluation) = self.evaluation_split(schema, &eval, eval_path)?;

        tracing::debug!(
            features = schema.feature_count(),
            training_rows = training.labels.len(),
            evaluation_rows = evaluation.len(),
            "Catalog loaded"
        );

        Ok(CatalogData {
            schema,
            training,
            evaluation,
        })
    }

    fn training_split(
        &self,
        table: &Table,
        path: &Path,
    ) -> Result<(Schema, TrainingSplit), CatalogError> {
        let label_column = &self.config.label_column;
        let label_index =
            table
                .column_index(label_column)
                .ok_or_else(|| CatalogError::MissingColumn {
                    path: path.to_path_buf(),
                    column: label_column.clone(),
                })?;

        let schema = Schema::from_training_header(&table.columns, label_column);

        let mut features = Vec::with_capacity(table.rows.len());
        let mut labels = Vec::with_capacity(table.rows.len());
        for (i, row) in table.rows.iter().enumerate() {
            let label = row[label_index];
            if label.fract() != 0.0 {
                return Err(CatalogError::Malformed {
                    path: path.to_path_buf(),
                    // +2: one for the header, one for 1-based numbering
                    line: i + 2,
                    message: format!("label '{}' is not an integer tier", label),
                });
            }
            labels.push(label as i64);
            features.push(
                row.iter()
                    .enumerate()
                    .filter(|(j, _)| *j != label_index)
                    .map(|(_, v)| *v)
                    .collect(),
            );
        }

        Ok((schema, TrainingSplit { features, labels }))
    }

    fn evaluation_split(
        &self,
        schema: Schema,
        table: &Table,
        path: &Path,
    ) -> Result<(Schema, Vec<DeviceRecord>), CatalogError> {
        let positions = schema
            .feature_columns()
            .iter()
            .map(|column| {
                table
                    .column_index(column)
                    .ok_or_else(|| CatalogError::MissingColumn {
                        path: path.to_path_buf(),
                        column: column.clone(),
                    })
            })
            .collect::<Result<Vec<usize>, _>>()?;

        let id_index = table.column_index(&self.config.id_column);

        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let id = match id_index {
                    Some(idx) if row[idx].fract() == 0.0 => row[idx] as i64,
                    Some(idx) => {
                        return Err(CatalogError::Malformed {
                            path: path.to_path_buf(),
                            line: i + 2,
                            message: format!("identifier '{}' is not an integer", row[idx]),
                        })
                    }
                    None => i as i64,
                };
                Ok(DeviceRecord {
                    id,
                    features: positions.iter().map(|&p| row[p]).collect(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let schema = schema.with_id_column(id_index.map(|_| self.config.id_column.clone()));
        Ok((schema, records))
    }
}
