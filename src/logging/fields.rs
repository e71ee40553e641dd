//! Field extraction helpers for structured logging

use crate::pipeline::{Recommendation, RecommendError};

/// Outcome label and error message for a finished recommendation
///
/// The label is `"success"` or the stable error kind code, so it can be
/// used both as a log field and as a metrics label.
///
/// # Examples
///
/// ```
/// use advisor::logging::extract_outcome;
/// use advisor::pipeline::{Recommendation, RecommendError};
///
/// let result: Result<Recommendation, RecommendError> = Err(RecommendError::NoMatchingDevices);
/// let (outcome, message) = extract_outcome(&result);
/// assert_eq!(outcome, "no_matching_devices");
/// assert!(message.is_some());
/// ```
pub fn extract_outcome(
    result: &Result<Recommendation, RecommendError>,
) -> (&'static str, Option<String>) {
    match result {
        Ok(_) => ("success", None),
        Err(e) => (e.kind().as_str(), Some(e.to_string())),
    }
}

/// Truncate user intent for logging preview (privacy-safe)
///
/// Returns None if content logging is disabled. When enabled, returns the
/// first ~100 characters of the intent.
///
/// # Examples
///
/// ```
/// use advisor::logging::intent_preview;
///
/// assert_eq!(intent_preview("gaming phone", false), None);
/// assert_eq!(intent_preview("gaming phone", true).as_deref(), Some("gaming phone"));
/// ```
pub fn intent_preview(intent: &str, enable_content_logging: bool) -> Option<String> {
    if !enable_content_logging || intent.trim().is_empty() {
        return None;
    }
    Some(truncate_string(intent.trim(), 100))
}

/// Truncate on a character boundary.
fn truncate_string(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
