//! Pipeline data types.

use crate::catalog::{DeviceRecord, Schema};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Spec columns exposed to the reasoning step, when the schema has them.
pub const CANDIDATE_FIELDS: &[&str] = &[
    "battery_power",
    "clock_speed",
    "ram",
    "px_height",
    "px_width",
    "mobile_wt",
    "four_g",
    "int_memory",
    "n_cores",
    "talk_time",
];

/// What the user asked for. Absent fields impose no restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserConstraints {
    pub budget_tiers: Option<BTreeSet<i64>>,
    pub requires_connectivity: bool,
    /// Minimum RAM in MB
    pub min_ram: Option<i64>,
    pub intent_text: String,
}

impl UserConstraints {
    pub fn new(intent_text: impl Into<String>) -> Self {
        Self {
            intent_text: intent_text.into(),
            ..Default::default()
        }
    }

    pub fn with_budget(mut self, tiers: impl IntoIterator<Item = i64>) -> Self {
        self.budget_tiers = Some(tiers.into_iter().collect());
        self
    }

    pub fn with_connectivity(mut self, required: bool) -> Self {
        self.requires_connectivity = required;
        self
    }

    pub fn with_min_ram(mut self, min_ram: i64) -> Self {
        self.min_ram = Some(min_ram);
        self
    }
}

/// Evaluation record plus the tier the classifier assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedDevice {
    pub record: DeviceRecord,
    pub predicted_price_range: i64,
}

/// Evaluation split with exactly one predicted tier per record.
#[derive(Debug, Clone)]
pub struct TierAnnotatedCatalog {
    schema: Schema,
    devices: Vec<AnnotatedDevice>,
}

impl TierAnnotatedCatalog {
    /// Pair each record with its tier. Callers guarantee equal lengths.
    pub fn new(schema: Schema, records: Vec<DeviceRecord>, tiers: Vec<i64>) -> Self {
        debug_assert_eq!(records.len(), tiers.len());
        let devices = records
            .into_iter()
            .zip(tiers)
            .map(|(record, predicted_price_range)| AnnotatedDevice {
                record,
                predicted_price_range,
            })
            .collect();
        Self { schema, devices }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn devices(&self) -> &[AnnotatedDevice] {
        &self.devices
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Shortlist entry handed to the reasoning step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub id: i64,
    pub predicted_price_range: i64,
    #[serde(flatten)]
    pub specs: BTreeMap<String, serde_json::Value>,
}

impl Candidate {
    pub fn from_device(device: &AnnotatedDevice, schema: &Schema) -> Self {
        let specs = CANDIDATE_FIELDS
            .iter()
            .filter_map(|&field| {
                let value = device.record.value(schema.index_of(field)?)?;
                Some((field.to_string(), spec_value(value)))
            })
            .collect();

        Self {
            id: device.record.id,
            predicted_price_range: device.predicted_price_range,
            specs,
        }
    }
}

/// Whole numbers render without a trailing `.0`.
fn spec_value(value: f64) -> serde_json::Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Value::from(value)
    }
}

/// Reference to the chosen device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectedDevice {
    pub id: i64,
    pub name: String,
}

/// Final answer for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recommendation {
    pub recommendation_id: String,
    pub user_intent: String,
    pub selected_device: SelectedDevice,
    pub confidence_score: f64,
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        let columns: Vec<String> = ["battery_power", "clock_speed", "blue", "ram", "price_range"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Schema::from_training_header(&columns, "price_range")
    }

    #[test]
    fn test_constraints_builder() {
        let c = UserConstraints::new("gaming")
            .with_budget([2, 3])
            .with_connectivity(true)
            .with_min_ram(3000);
        assert_eq!(c.budget_tiers, Some(BTreeSet::from([2, 3])));
        assert!(c.requires_connectivity);
        assert_eq!(c.min_ram, Some(3000));
        assert_eq!(c.intent_text, "gaming");
    }

    #[test]
    fn test_candidate_exposes_bounded_fields() {
        let device = AnnotatedDevice {
            record: DeviceRecord {
                id: 12,
                features: vec![1500.0, 2.5, 1.0, 3072.0],
            },
            predicted_price_range: 3,
        };
        let candidate = Candidate::from_device(&device, &schema());

        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["id"], 12);
        assert_eq!(json["predicted_price_range"], 3);
        assert_eq!(json["battery_power"], 1500);
        assert_eq!(json["clock_speed"], 2.5);
        assert_eq!(json["ram"], 3072);
        // Not in the exposed field list
        assert!(json.get("blue").is_none());
        // Not in the schema
        assert!(json.get("mobile_wt").is_none());
    }

    #[test]
    fn test_annotated_catalog_pairs_records_and_tiers() {
        let records = vec![
            DeviceRecord { id: 1, features: vec![0.0; 4] },
            DeviceRecord { id: 2, features: vec![0.0; 4] },
        ];
        let catalog = TierAnnotatedCatalog::new(schema(), records, vec![0, 2]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.devices()[1].predicted_price_range, 2);
        assert_eq!(catalog.devices()[1].record.id, 2);
    }

    #[test]
    fn test_recommendation_rejects_unknown_keys() {
        let json = serde_json::json!({
            "recommendation_id": "rec_1",
            "user_intent": "x",
            "selected_device": {"id": 1, "name": "Device 1"},
            "confidence_score": 0.9,
            "reasoning": "ok",
            "extra": true
        });
        assert!(serde_json::from_value::<Recommendation>(json).is_err());
    }
}
