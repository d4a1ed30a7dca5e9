use crate::models::{Candidate, CandidateId, CustomRecommendRequest};
use std::collections::HashSet;

/// Round a compatibility score to one decimal place
#[inline]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Check if a candidate may be offered a collaborative prediction
///
/// The candidate must be available and not yet rated by the household.
#[inline]
pub fn is_unrated_and_available(candidate: &Candidate, rated: &HashSet<CandidateId>) -> bool {
    candidate.is_available() && !rated.contains(&candidate.id)
}

/// Hard filters applied before custom content scoring
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CandidateFilter {
    pub min_rating: Option<f64>,
    pub max_age: Option<u8>,
    pub min_experience: Option<u8>,
}

impl CandidateFilter {
    pub fn from_request(request: &CustomRecommendRequest) -> Self {
        Self {
            min_rating: request.min_rating,
            max_age: request.max_age,
            min_experience: request.min_experience,
        }
    }

    /// Number of filters that are actually set
    pub fn active_count(&self) -> usize {
        [
            self.min_rating.is_some(),
            self.max_age.is_some(),
            self.min_experience.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }
}

/// Check if a candidate passes the custom hard filters
#[inline]
pub fn matches_filter(candidate: &Candidate, filter: &CandidateFilter) -> bool {
    if let Some(min_rating) = filter.min_rating {
        if candidate.rating < min_rating {
            return false;
        }
    }

    if let Some(max_age) = filter.max_age {
        if candidate.age > max_age {
            return false;
        }
    }

    if let Some(min_experience) = filter.min_experience {
        if candidate.experience_years < min_experience {
            return false;
        }
    }

    true
}
