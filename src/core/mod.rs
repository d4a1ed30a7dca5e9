// Core algorithm exports
pub mod collaborative;
pub mod content;
pub mod factors;
pub mod filters;
pub mod hybrid;
pub mod recommender;
pub mod similarity;
pub mod skills;

pub use collaborative::rank_by_prediction;
pub use content::{calculate_content_score, rank_by_content};
pub use factors::{CollaborativeModel, LatentFactorModel, RatingPredictor};
pub use filters::{matches_filter, round_one_decimal, CandidateFilter};
pub use hybrid::blend;
pub use recommender::Recommender;
pub use similarity::{calculate_similarity, rank_similar};
pub use skills::{derive_skill_tags, materialize_skills};

use crate::models::RecommendationItem;

/// Sort by compatibility score, highest first
///
/// `sort_by` is stable, so equal scores keep their encounter order.
pub(crate) fn sort_by_score(items: &mut [RecommendationItem]) {
    items.sort_by(|a, b| {
        b.compatibility_score
            .partial_cmp(&a.compatibility_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
