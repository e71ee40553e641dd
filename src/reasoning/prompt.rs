//! Prompt construction for the reasoning step.

use crate::pipeline::Candidate;

const COLUMN_GUIDE: &str = "\
- battery_power: Energy capacity (mAh)
- clock_speed: Processor speed (GHz)
- ram: RAM in MB
- px_height/px_width: Resolution
- mobile_wt: Weight (g)
- four_g: 1 if the device supports 4G
- predicted_price_range: Price tier assigned by the classifier (0 = cheapest)";

/// Build the single instruction prompt for one request.
///
/// The intent is embedded as a JSON string literal so quotes and newlines in
/// user text cannot break the surrounding template.
pub fn build_prompt(intent: &str, candidates: &[Candidate]) -> Result<String, serde_json::Error> {
    let intent_literal = serde_json::to_string(intent)?;
    let candidates_json = serde_json::to_string(candidates)?;

    Ok(format!(
        r#"You are an expert Mobile Phone Recommendation Assistant.

User Intent: {intent}

Here is a list of candidate devices that match the user's budget and technical constraints:
{candidates}

Dataset Column Guide:
{guide}

Task:
1. Analyze the user's intent.
2. Select the ONE best device from the candidates.
3. Provide reasoning based on technical specs.

Output ONLY valid JSON in this format, with no other keys:
{{
  "recommendation_id": "rec_<device_id>",
  "user_intent": {intent},
  "selected_device": {{ "id": <device_id>, "name": "Device <device_id>" }},
  "confidence_score": <number between 0 and 1>,
  "reasoning": "Explanation..."
}}
"#,
        intent = intent_literal,
        candidates = candidates_json,
        guide = COLUMN_GUIDE,
    ))
}
