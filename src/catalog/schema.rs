//! Feature schema descriptor.
//!
//! Built once from the training header. Well-known columns used by the
//! constraint filters are resolved here so that later stages never look
//! columns up by name.

use serde::Serialize;

/// Connectivity flag column (1 = 4G capable).
pub const FOUR_G_COLUMN: &str = "four_g";
/// RAM column, in MB.
pub const RAM_COLUMN: &str = "ram";

/// Ordered feature columns plus resolved positions of well-known columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    feature_columns: Vec<String>,
    id_column: Option<String>,
    four_g: Option<usize>,
    ram: Option<usize>,
}

impl Schema {
    /// Feature schema is every training column except the label.
    pub fn from_training_header(columns: &[String], label_column: &str) -> Self {
        let feature_columns: Vec<String> = columns
            .iter()
            .filter(|c| c.as_str() != label_column)
            .cloned()
            .collect();
        let position = |name: &str| feature_columns.iter().position(|c| c == name);
        let four_g = position(FOUR_G_COLUMN);
        let ram = position(RAM_COLUMN);

        Self {
            feature_columns,
            id_column: None,
            four_g,
            ram,
        }
    }

    /// Record that the evaluation split carries an identifier column.
    pub fn with_id_column(mut self, id_column: Option<String>) -> Self {
        self.id_column = id_column;
        self
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn feature_count(&self) -> usize {
        self.feature_columns.len()
    }

    pub fn id_column(&self) -> Option<&str> {
        self.id_column.as_deref()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.feature_columns.iter().position(|c| c == name)
    }

    pub fn four_g_index(&self) -> Option<usize> {
        self.four_g
    }

    pub fn ram_index(&self) -> Option<usize> {
        self.ram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_label_excluded_from_features() {
        let schema =
            Schema::from_training_header(&cols(&["battery_power", "ram", "price_range"]), "price_range");
        assert_eq!(schema.feature_columns(), &["battery_power", "ram"]);
        assert_eq!(schema.feature_count(), 2);
    }

    #[test]
    fn test_well_known_columns_resolved() {
        let schema = Schema::from_training_header(
            &cols(&["four_g", "price_range", "ram", "mobile_wt"]),
            "price_range",
        );
        assert_eq!(schema.four_g_index(), Some(0));
        assert_eq!(schema.ram_index(), Some(1));
        assert_eq!(schema.index_of("mobile_wt"), Some(2));
    }

    #[test]
    fn test_absent_well_known_columns() {
        let schema = Schema::from_training_header(&cols(&["battery_power", "price_range"]), "price_range");
        assert!(schema.four_g_index().is_none());
        assert!(schema.ram_index().is_none());
        assert!(schema.id_column().is_none());
    }
}
