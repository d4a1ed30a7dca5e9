use crate::models::{CandidateId, HouseholdId};
use thiserror::Error;

/// Errors a scoring operation can report to its caller
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// No fitted collaborative model; callers fall back rather than fail
    #[error("Collaborative model not available")]
    CollaborativeUnavailable,

    #[error("{0}")]
    MissingArgument(String),

    #[error("Invalid algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Malformed or unmaterialized input data
    #[error("Data error: {0}")]
    Data(String),

    #[error("Household not found: {0}")]
    HouseholdNotFound(HouseholdId),

    #[error("Au pair not found: {0}")]
    CandidateNotFound(CandidateId),
}

impl RecommendError {
    /// Whether the error describes bad caller input rather than a data or model problem
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RecommendError::MissingArgument(_)
                | RecommendError::UnknownAlgorithm(_)
                | RecommendError::HouseholdNotFound(_)
                | RecommendError::CandidateNotFound(_)
        )
    }
}
