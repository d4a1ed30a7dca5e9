use crate::core::filters::round_one_decimal;
use crate::error::RecommendError;
use crate::models::{Candidate, ContentWeights, RecommendationItem, Requirements};
use std::collections::HashSet;

const DEFAULT_EXPLANATION: &str = "Basic compatibility";

/// Score one candidate against a requirement set
///
/// Returns the composite in `[0, 1]` and the explanation fragments.
/// Scoring formula:
/// score = (
///     skill_overlap * 0.6 +        # |required ∩ candidate| / |required|
///     location_match * 0.2 +       # requested location within candidate region
///     gender_match * 0.1 +         # no preference, or preference satisfied
///     rating / 5 * 0.1             # unconditional rating bonus
/// )
pub fn calculate_content_score(
    candidate: &Candidate,
    requirements: &Requirements,
    required_skills: &HashSet<&str>,
    weights: &ContentWeights,
) -> Result<(f64, Vec<String>), RecommendError> {
    let candidate_skills = candidate.skill_tags().ok_or_else(|| {
        RecommendError::Data(format!("au pair {} has no derived skill tags", candidate.id))
    })?;

    let mut score = 0.0;
    let mut explanation = Vec::new();

    // Empty requirements skip the term entirely
    if !required_skills.is_empty() {
        let overlap = required_skills.intersection(&candidate_skills).count() as f64
            / required_skills.len() as f64;
        score += overlap * weights.skills;
        if overlap > 0.5 {
            explanation.push(format!("Good skill match ({:.0}%)", overlap * 100.0));
        }
    }

    if location_matches(&requirements.location, &candidate.region) {
        score += weights.location;
        explanation.push("Same location".to_string());
    }

    if requirements.gender.accepts(&candidate.gender) {
        score += weights.gender;
        if requirements.gender.is_specific() {
            explanation.push("Matches gender preference".to_string());
        }
    }

    score += (candidate.rating / 5.0) * weights.rating;

    Ok((score, explanation))
}

/// Case-insensitive containment of the requested location in a region name
#[inline]
fn location_matches(location: &str, region: &str) -> bool {
    !location.is_empty() && region.to_lowercase().contains(&location.to_lowercase())
}

/// Rank available candidates by content compatibility
///
/// Busy candidates are dropped before scoring. Scores are `[0,1]` composites
/// scaled to `[0,100]` and rounded to one decimal; ties keep table order.
pub fn rank_by_content(
    candidates: &[Candidate],
    requirements: &Requirements,
    weights: &ContentWeights,
    limit: usize,
) -> Result<Vec<RecommendationItem>, RecommendError> {
    let required_skills: HashSet<&str> = requirements.skills.iter().map(String::as_str).collect();

    let mut scored = Vec::new();
    for candidate in candidates.iter().filter(|c| c.is_available()) {
        let (score, explanation) =
            calculate_content_score(candidate, requirements, &required_skills, weights)?;

        let explanation = if explanation.is_empty() {
            DEFAULT_EXPLANATION.to_string()
        } else {
            explanation.join("; ")
        };

        scored.push(RecommendationItem::from_candidate(
            candidate,
            round_one_decimal(score * 100.0),
            explanation,
        ));
    }

    super::sort_by_score(&mut scored);
    scored.truncate(limit);

    Ok(scored)
}
