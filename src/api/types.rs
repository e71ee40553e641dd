//! Request and response types for the recommendation API.

use super::headers::ERROR_KIND_HEADER;
use crate::pipeline::{ErrorKind, RecommendError, UserConstraints};
use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/recommend`. Only `user_intent` is required.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_4g: Option<bool>,
    /// Minimum RAM in MB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ram: Option<i64>,
    pub user_intent: String,
}

impl RecommendRequest {
    /// An empty budget list means no budget filter.
    pub fn to_constraints(&self) -> UserConstraints {
        UserConstraints {
            budget_tiers: self
                .budget_range
                .as_ref()
                .filter(|tiers| !tiers.is_empty())
                .map(|tiers| tiers.iter().copied().collect()),
            requires_connectivity: self.requires_4g.unwrap_or(false),
            min_ram: self.min_ram,
            intent_text: self.user_intent.clone(),
        }
    }
}

/// Error body: `{"error": "<message>"}`. The kind travels in a header.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub kind: Option<ErrorKind>,
}

impl ApiError {
    /// Error outside the pipeline (rejected body, timeout); no kind header.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            kind: None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        Self {
            error: err.to_string(),
            kind: Some(err.kind()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind;
        let mut response = (StatusCode::BAD_REQUEST, Json(self)).into_response();
        if let Some(kind) = kind {
            response.headers_mut().insert(
                HeaderName::from_static(ERROR_KIND_HEADER),
                HeaderValue::from_static(kind.as_str()),
            );
        }
        response
    }
}
