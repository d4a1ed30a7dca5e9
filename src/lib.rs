//! Aupair Match - Hybrid recommendation engine for au pair placement
//!
//! This library ranks au pairs for parent households by blending two scorers:
//! attribute/skill similarity and latent-factor rating prediction. Every
//! scoring call reads an immutable model snapshot and returns a
//! success/failure result instead of raising.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{CollaborativeModel, LatentFactorModel, RatingPredictor, Recommender};
pub use error::RecommendError;
pub use models::{
    Algorithm, Candidate, Household, ModelSnapshot, RatingLog, RecommendRequest,
    RecommendationItem, RecommendationResponse, Requirements, ScoringWeights,
};
pub use services::{ArtifactError, ArtifactStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // An empty snapshot still yields a structured, successful content run
        let recommender = Recommender::with_default_weights();
        let result = recommender.score_content(&ModelSnapshot::default(), &Requirements::default(), 10);
        assert!(result.unwrap().items.is_empty());
    }
}
