//! Candidate Selector - bounds the shortlist sent to the reasoning step.
//!
//! Keeps catalog order and takes the first `limit` devices. Ranking is left
//! to the reasoning step.

use super::{AnnotatedDevice, Candidate};
use crate::catalog::Schema;

pub fn select_candidates(
    filtered: &[&AnnotatedDevice],
    schema: &Schema,
    limit: usize,
) -> Vec<Candidate> {
    filtered
        .iter()
        .take(limit)
        .map(|device| Candidate::from_device(device, schema))
        .collect()
}
