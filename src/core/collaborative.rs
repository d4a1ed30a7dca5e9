use crate::core::factors::RatingPredictor;
use crate::core::filters::{is_unrated_and_available, round_one_decimal};
use crate::error::RecommendError;
use crate::models::{Candidate, HouseholdId, RatingLog, RecommendationItem};

pub const COLLABORATIVE_EXPLANATION: &str = "Recommended by similar parents";

/// Rank unrated, available candidates by predicted affinity
///
/// Each prediction (rating scale 1..=5) is multiplied by `scale` and rounded to
/// one decimal. Pairs already present in the rating log are never predicted.
/// Without a fitted predictor the scorer reports itself unavailable.
pub fn rank_by_prediction(
    candidates: &[Candidate],
    ratings: &RatingLog,
    predictor: Option<&dyn RatingPredictor>,
    household_id: HouseholdId,
    scale: f64,
    limit: usize,
) -> Result<Vec<RecommendationItem>, RecommendError> {
    let predictor = predictor.ok_or(RecommendError::CollaborativeUnavailable)?;

    let rated = ratings.rated_by(household_id);

    let mut predictions: Vec<RecommendationItem> = candidates
        .iter()
        .filter(|candidate| is_unrated_and_available(candidate, &rated))
        .map(|candidate| {
            let estimate = predictor.predict(household_id, candidate.id);
            RecommendationItem::from_candidate(
                candidate,
                round_one_decimal(estimate * scale),
                COLLABORATIVE_EXPLANATION.to_string(),
            )
        })
        .collect();

    tracing::debug!(
        "Predicted {} unrated candidates for household {} ({} already rated)",
        predictions.len(),
        household_id,
        rated.len()
    );

    super::sort_by_score(&mut predictions);
    predictions.truncate(limit);

    Ok(predictions)
}
