//! Constraint Filter - narrows the annotated catalog to devices that satisfy
//! every supplied constraint.
//!
//! Each constraint becomes a [`DeviceFilter`]. Filters are pure predicates
//! over immutable records, so they are combined into one pass and their
//! order never changes the result. A filter whose column is missing from the
//! schema is skipped with a warning rather than silently matching.

use super::{AnnotatedDevice, RecommendError, TierAnnotatedCatalog, UserConstraints};
use crate::catalog::{Schema, FOUR_G_COLUMN, RAM_COLUMN};
use std::collections::BTreeSet;

/// A single constraint predicate.
pub trait DeviceFilter: Send + Sync {
    /// Identifier for logging.
    fn name(&self) -> &'static str;

    fn matches(&self, device: &AnnotatedDevice) -> bool;
}

/// Predicted tier must be one of the accepted tiers.
pub struct BudgetFilter {
    tiers: BTreeSet<i64>,
}

impl DeviceFilter for BudgetFilter {
    fn name(&self) -> &'static str {
        "budget"
    }

    fn matches(&self, device: &AnnotatedDevice) -> bool {
        self.tiers.contains(&device.predicted_price_range)
    }
}

/// Connectivity flag must be set.
pub struct ConnectivityFilter {
    column: usize,
}

impl DeviceFilter for ConnectivityFilter {
    fn name(&self) -> &'static str {
        "connectivity"
    }

    fn matches(&self, device: &AnnotatedDevice) -> bool {
        device.record.value(self.column).is_some_and(|v| v != 0.0)
    }
}

/// RAM must reach the requested minimum.
pub struct MinRamFilter {
    column: usize,
    min_ram: i64,
}

impl DeviceFilter for MinRamFilter {
    fn name(&self) -> &'static str {
        "min_ram"
    }

    fn matches(&self, device: &AnnotatedDevice) -> bool {
        device
            .record
            .value(self.column)
            .is_some_and(|ram| ram >= self.min_ram as f64)
    }
}

/// The filters that apply to one request.
pub struct ConstraintFilter {
    filters: Vec<Box<dyn DeviceFilter>>,
    skipped: Vec<&'static str>,
}

impl ConstraintFilter {
    /// Build the filters implied by `constraints` against `schema`.
    pub fn new(constraints: &UserConstraints, schema: &Schema) -> Self {
        let mut filters: Vec<Box<dyn DeviceFilter>> = Vec::new();
        let mut skipped = Vec::new();

        if let Some(tiers) = constraints.budget_tiers.as_ref().filter(|t| !t.is_empty()) {
            filters.push(Box::new(BudgetFilter {
                tiers: tiers.clone(),
            }));
        }

        if constraints.requires_connectivity {
            match schema.four_g_index() {
                Some(column) => filters.push(Box::new(ConnectivityFilter { column })),
                None => {
                    tracing::warn!(
                        filter = "connectivity",
                        column = FOUR_G_COLUMN,
                        "Filter skipped: column absent from catalog schema"
                    );
                    skipped.push("connectivity");
                }
            }
        }

        if let Some(min_ram) = constraints.min_ram {
            match schema.ram_index() {
                Some(column) => filters.push(Box::new(MinRamFilter { column, min_ram })),
                None => {
                    tracing::warn!(
                        filter = "min_ram",
                        column = RAM_COLUMN,
                        "Filter skipped: column absent from catalog schema"
                    );
                    skipped.push("min_ram");
                }
            }
        }

        Self { filters, skipped }
    }

    /// Names of filters that will run.
    pub fn active(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Names of requested filters that could not run.
    pub fn skipped(&self) -> &[&'static str] {
        &self.skipped
    }

    pub fn matches(&self, device: &AnnotatedDevice) -> bool {
        self.filters.iter().all(|f| f.matches(device))
    }

    /// Devices passing every filter, in catalog order.
    pub fn apply<'a>(
        &self,
        catalog: &'a TierAnnotatedCatalog,
    ) -> Result<Vec<&'a AnnotatedDevice>, RecommendError> {
        let matched: Vec<&AnnotatedDevice> = catalog
            .devices()
            .iter()
            .filter(|d| self.matches(d))
            .collect();

        tracing::debug!(
            filters = ?self.active(),
            skipped = ?self.skipped,
            catalog = catalog.len(),
            matched = matched.len(),
            "Constraint filtering complete"
        );

        if matched.is_empty() {
            return Err(RecommendError::NoMatchingDevices);
        }
        Ok(matched)
    }
}

/// Convenience wrapper: build and apply in one call.
pub fn filter_devices<'a>(
    catalog: &'a TierAnnotatedCatalog,
    constraints: &UserConstraints,
) -> Result<Vec<&'a AnnotatedDevice>, RecommendError> {
    ConstraintFilter::new(constraints, catalog.schema()).apply(catalog)
}
