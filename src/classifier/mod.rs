//! Tier Classifier - random forest that assigns a price tier to each device.
//!
//! Trees are grown on bootstrap samples with Gini impurity and a random
//! feature subset per split. Every tree draws from its own ChaCha stream
//! seeded with `seed + tree_index`, so identical data and configuration
//! always produce an identical forest.
//!
//! # Example
//!
//! ```rust
//! use advisor::classifier::TierClassifier;
//! use advisor::config::ClassifierConfig;
//!
//! let features = vec![vec![500.0], vec![800.0], vec![3500.0], vec![3900.0]];
//! let labels = vec![0, 0, 3, 3];
//! let config = ClassifierConfig { n_estimators: 10, ..Default::default() };
//!
//! let model = TierClassifier::train(&features, &labels, &config).unwrap();
//! assert_eq!(model.predict(&[vec![600.0], vec![3700.0]]).unwrap(), vec![0, 3]);
//! ```

mod error;
mod tree;

pub use error::ClassifierError;
pub use tree::{DecisionTree, Node, TreeParams};

use crate::config::ClassifierConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Trained forest. Immutable once built.
#[derive(Debug, Clone)]
pub struct TierClassifier {
    trees: Vec<DecisionTree>,
    /// Sorted distinct tier labels; tree outputs index into this
    classes: Vec<i64>,
    n_features: usize,
}

impl TierClassifier {
    /// Fit a forest on the full training split.
    pub fn train(
        features: &[Vec<f64>],
        labels: &[i64],
        config: &ClassifierConfig,
    ) -> Result<Self, ClassifierError> {
        if features.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }
        if features.len() != labels.len() {
            return Err(ClassifierError::LabelCountMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        let n_features = features[0].len();
        if n_features == 0 {
            return Err(ClassifierError::NoFeatures);
        }
        check_widths(features, n_features)?;

        let mut classes = labels.to_vec();
        classes.sort_unstable();
        classes.dedup();
        let targets: Vec<usize> = labels
            .iter()
            .map(|l| classes.binary_search(l).unwrap_or_default())
            .collect();

        let params = TreeParams {
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
            max_features: ((n_features as f64).sqrt() as usize).max(1),
        };

        let n = features.len();
        let trees = (0..config.n_estimators)
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(i as u64));
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(features, &targets, classes.len(), bootstrap, &params, &mut rng)
            })
            .collect();

        Ok(Self {
            trees,
            classes,
            n_features,
        })
    }

    /// Predict one tier per row by majority vote; ties go to the lower tier.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i64>, ClassifierError> {
        check_widths(rows, self.n_features)?;

        Ok(rows
            .iter()
            .map(|row| {
                let mut votes = vec![0usize; self.classes.len()];
                for tree in &self.trees {
                    votes[tree.predict(row)] += 1;
                }
                self.classes[tree::majority_class(&votes)]
            })
            .collect())
    }

    pub fn n_estimators(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Distinct tiers seen during training, ascending.
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }
}

fn check_widths(rows: &[Vec<f64>], expected: usize) -> Result<(), ClassifierError> {
    match rows.iter().position(|r| r.len() != expected) {
        Some(row) => Err(ClassifierError::WidthMismatch {
            row,
            expected,
            found: rows[row].len(),
        }),
        None => Ok(()),
    }
}
