//! Recommend command implementation

use crate::cli::output::format_recommendation_json;
use crate::cli::RecommendArgs;
use crate::pipeline::Recommender;
use std::time::Duration;

/// Handle `advisor recommend`: one full pipeline run, printed as JSON.
pub async fn handle_recommend(args: &RecommendArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.pipeline.load_config()?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.server.request_timeout_seconds))
        .build()?;

    let recommender = Recommender::from_config(&config, client);
    let constraints = args.constraints.to_constraints(&args.intent);
    let recommendation = recommender.recommend(&constraints).await?;

    Ok(format_recommendation_json(&recommendation)?)
}
