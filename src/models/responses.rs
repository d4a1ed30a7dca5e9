use serde::{Deserialize, Serialize};
use crate::error::RecommendError;
use crate::models::domain::{CandidateId, RecommendationItem, Recommendations, SimilarCandidate};
use crate::models::snapshot::SnapshotSummary;

/// Success/failure document every recommendation operation resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecommendationResponse {
    Success {
        success: bool,
        recommendations: Vec<RecommendationItem>,
        algorithm: String,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl RecommendationResponse {
    pub fn failure(error: impl ToString) -> Self {
        RecommendationResponse::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RecommendationResponse::Success { .. })
    }
}

impl From<Recommendations> for RecommendationResponse {
    fn from(result: Recommendations) -> Self {
        RecommendationResponse::Success {
            success: true,
            recommendations: result.items,
            algorithm: result.algorithm.label().to_string(),
        }
    }
}

impl From<Result<Recommendations, RecommendError>> for RecommendationResponse {
    fn from(result: Result<Recommendations, RecommendError>) -> Self {
        match result {
            Ok(recommendations) => recommendations.into(),
            Err(e) => RecommendationResponse::failure(e),
        }
    }
}

/// Response for similar au pair lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarResponse {
    pub success: bool,
    pub similar: Vec<SimilarCandidate>,
    pub reference_id: CandidateId,
    pub total_found: usize,
}

/// Response for the `status` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub summary: SnapshotSummary,
}

/// Generic success/failure message, used by `materialize`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), error: None }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self { success: false, message: None, error: Some(error.to_string()) }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub model: SnapshotSummary,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
