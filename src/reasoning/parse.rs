//! Response cleanup and contract validation.

use crate::pipeline::{Candidate, Recommendation, RecommendError};

/// Remove a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the language tag, if any
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parse the model's answer into a [`Recommendation`].
///
/// Any deviation from the contract is a `ReasoningFailed`: unparsable text,
/// missing or extra keys, a confidence outside `[0, 1]`, or a selected id that
/// was not on the shortlist.
pub fn parse_recommendation(
    raw: &str,
    candidates: &[Candidate],
) -> Result<Recommendation, RecommendError> {
    let cleaned = strip_code_fences(raw);

    let recommendation: Recommendation = serde_json::from_str(cleaned).map_err(|e| {
        RecommendError::ReasoningFailed(format!("response is not a valid recommendation: {}", e))
    })?;

    let score = recommendation.confidence_score;
    if !(0.0..=1.0).contains(&score) {
        return Err(RecommendError::ReasoningFailed(format!(
            "confidence_score {} outside [0, 1]",
            score
        )));
    }

    let selected = recommendation.selected_device.id;
    if !candidates.iter().any(|c| c.id == selected) {
        return Err(RecommendError::ReasoningFailed(format!(
            "selected device {} was not among the candidates",
            selected
        )));
    }

    Ok(recommendation)
}
