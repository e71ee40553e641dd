//! Output formatting helpers for CLI commands

use crate::pipeline::{Candidate, Recommendation, CANDIDATE_FIELDS};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Format the shortlist as a table.
///
/// Columns are `id`, `tier` and every spec field present on at least one
/// candidate, in the fixed field order.
pub fn format_candidates_table(candidates: &[Candidate]) -> String {
    let fields: Vec<&str> = CANDIDATE_FIELDS
        .iter()
        .copied()
        .filter(|f| candidates.iter().any(|c| c.specs.contains_key(*f)))
        .collect();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec!["ID", "Tier"];
    header.extend(fields.iter().copied());
    table.set_header(header);

    for c in candidates {
        let mut row = vec![
            Cell::new(c.id),
            Cell::new(tier_label(c.predicted_price_range)),
        ];
        row.extend(fields.iter().map(|f| match c.specs.get(*f) {
            Some(value) => Cell::new(value.to_string()),
            None => Cell::new("-"),
        }));
        table.add_row(row);
    }

    table.to_string()
}

fn tier_label(tier: i64) -> String {
    let label = tier.to_string();
    match tier {
        0 => label.green().to_string(),
        1 => label.cyan().to_string(),
        2 => label.yellow().to_string(),
        _ => label.red().to_string(),
    }
}

/// Format the shortlist as JSON
pub fn format_candidates_json(candidates: &[Candidate]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&json!({
        "count": candidates.len(),
        "candidates": candidates,
    }))
}

/// Format a recommendation as JSON
pub fn format_recommendation_json(recommendation: &Recommendation) -> serde_json::Result<String> {
    serde_json::to_string_pretty(recommendation)
}
