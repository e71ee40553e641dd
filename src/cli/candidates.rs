//! Candidates command implementation

use crate::cli::output::{format_candidates_json, format_candidates_table};
use crate::cli::CandidatesArgs;
use crate::pipeline::RecommendationCache;

/// Handle `advisor candidates`: train, filter and select, no reasoning call.
pub async fn handle_candidates(args: &CandidatesArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.pipeline.load_config()?;
    let cache = RecommendationCache::new(config.catalog.clone(), config.classifier.clone());
    let state = cache.get_or_initialize().await?;

    let constraints = args.constraints.to_constraints("");
    let filtered = crate::pipeline::filter_devices(&state.catalog, &constraints)?;
    let candidates = crate::pipeline::select_candidates(
        &filtered,
        state.catalog.schema(),
        config.selection.max_candidates,
    );

    if args.json {
        Ok(format_candidates_json(&candidates)?)
    } else {
        Ok(format!(
            "{}\n{} of {} matching devices shown",
            format_candidates_table(&candidates),
            candidates.len(),
            filtered.len()
        ))
    }
}
