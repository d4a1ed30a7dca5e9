use crate::core::{
    collaborative::rank_by_prediction,
    content::rank_by_content,
    filters::{matches_filter, CandidateFilter},
    hybrid::blend,
    similarity::rank_similar,
};
use crate::error::RecommendError;
use crate::models::{
    Algorithm, Candidate, CandidateId, CustomRecommendRequest, HouseholdId, ModelSnapshot,
    RecommendRequest, Recommendations, Requirements, ScoringWeights, SimilarCandidate,
};

/// Main recommendation orchestrator
///
/// Holds only the scoring weights; every call reads from an immutable
/// [`ModelSnapshot`] supplied by the caller.
///
/// # Algorithms
/// 1. Content: requirement overlap, location, gender and rating
/// 2. Collaborative: latent-factor predictions for unrated au pairs
/// 3. Hybrid: weighted union of both, content-only when no model is fit
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Top `limit` available au pairs by content compatibility
    pub fn score_content(
        &self,
        snapshot: &ModelSnapshot,
        requirements: &Requirements,
        limit: usize,
    ) -> Result<Recommendations, RecommendError> {
        let items = rank_by_content(&snapshot.candidates, requirements, &self.weights.content, limit)?;

        Ok(Recommendations {
            items,
            algorithm: Algorithm::Content,
        })
    }

    /// Top `limit` unrated, available au pairs by predicted affinity
    ///
    /// Fails with [`RecommendError::CollaborativeUnavailable`] when the snapshot
    /// carries no fitted model.
    pub fn score_collaborative(
        &self,
        snapshot: &ModelSnapshot,
        household_id: HouseholdId,
        limit: usize,
    ) -> Result<Recommendations, RecommendError> {
        let items = rank_by_prediction(
            &snapshot.candidates,
            &snapshot.ratings,
            snapshot.collaborative.predictor(),
            household_id,
            self.weights.blend.collaborative_scale,
            limit,
        )?;

        Ok(Recommendations {
            items,
            algorithm: Algorithm::Collaborative,
        })
    }

    /// Top `limit` au pairs by the weighted blend of both scorers
    pub fn score_hybrid(
        &self,
        snapshot: &ModelSnapshot,
        household_id: HouseholdId,
        requirements: &Requirements,
        limit: usize,
    ) -> Result<Recommendations, RecommendError> {
        let fetch = limit.saturating_mul(self.weights.blend.overfetch.max(1));

        // Content failures are bad data, not a missing model; they fail the whole run
        let content = self.score_content(snapshot, requirements, fetch)?.items;

        let collaborative = match self.score_collaborative(snapshot, household_id, fetch) {
            Ok(result) => Some(result.items),
            Err(RecommendError::CollaborativeUnavailable) => {
                tracing::warn!(
                    "Collaborative model unavailable, blending content scores only for household {}",
                    household_id
                );
                None
            }
            Err(e) => return Err(e),
        };

        let items = blend(content, collaborative, &self.weights.blend, limit);

        Ok(Recommendations {
            items,
            algorithm: Algorithm::Hybrid,
        })
    }

    /// Dispatch a request on its algorithm selector
    ///
    /// Defaults to the hybrid algorithm. Collaborative and hybrid runs need a
    /// parent id.
    pub fn recommend(
        &self,
        snapshot: &ModelSnapshot,
        request: &RecommendRequest,
    ) -> Result<Recommendations, RecommendError> {
        let algorithm: Algorithm = match request.algorithm.as_deref() {
            Some(selector) => selector.parse()?,
            None => Algorithm::default(),
        };

        // Ids start at 1; a zero id is treated as absent
        let parent_id = request.parent_id.filter(|id| *id != 0);

        tracing::info!(
            "Recommending with {} algorithm, parent: {:?}, limit: {}",
            algorithm.label(),
            parent_id,
            request.limit
        );

        let result = match algorithm {
            Algorithm::Content => {
                self.score_content(snapshot, &request.parent_requirements, request.limit)
            }
            Algorithm::Collaborative => {
                let parent_id = parent_id.ok_or_else(|| {
                    RecommendError::MissingArgument(
                        "Parent ID required for collaborative filtering".to_string(),
                    )
                })?;
                self.score_collaborative(snapshot, parent_id, request.limit)
            }
            Algorithm::Hybrid => {
                let parent_id = parent_id.ok_or_else(|| {
                    RecommendError::MissingArgument(
                        "Parent ID required for hybrid recommendations".to_string(),
                    )
                })?;
                self.score_hybrid(snapshot, parent_id, &request.parent_requirements, request.limit)
            }
        }?;

        tracing::info!(
            "Returning {} {} recommendations",
            result.items.len(),
            result.algorithm.label()
        );

        Ok(result)
    }

    /// Recommend for a stored household, deriving requirements from its profile
    pub fn recommend_for_household(
        &self,
        snapshot: &ModelSnapshot,
        household_id: HouseholdId,
        algorithm: Algorithm,
        limit: usize,
    ) -> Result<Recommendations, RecommendError> {
        let household = snapshot
            .household(household_id)
            .ok_or(RecommendError::HouseholdNotFound(household_id))?;

        let requirements = Requirements::from_household(household);

        match algorithm {
            Algorithm::Content => self.score_content(snapshot, &requirements, limit),
            Algorithm::Collaborative => self.score_collaborative(snapshot, household_id, limit),
            Algorithm::Hybrid => self.score_hybrid(snapshot, household_id, &requirements, limit),
        }
    }

    /// Content recommendations over candidates passing the custom hard filters
    pub fn recommend_custom(
        &self,
        snapshot: &ModelSnapshot,
        request: &CustomRecommendRequest,
    ) -> Result<Recommendations, RecommendError> {
        let filter = CandidateFilter::from_request(request);

        let filtered: Vec<Candidate> = snapshot
            .candidates
            .iter()
            .filter(|candidate| matches_filter(candidate, &filter))
            .cloned()
            .collect();

        tracing::debug!(
            "Custom filters ({} active) kept {} of {} au pairs",
            filter.active_count(),
            filtered.len(),
            snapshot.candidates.len()
        );

        let items = rank_by_content(&filtered, &request.requirements, &self.weights.content, request.limit)?;

        Ok(Recommendations {
            items,
            algorithm: Algorithm::Content,
        })
    }

    /// Available au pairs most similar to a reference au pair
    pub fn similar(
        &self,
        snapshot: &ModelSnapshot,
        candidate_id: CandidateId,
        limit: usize,
    ) -> Result<Vec<SimilarCandidate>, RecommendError> {
        let reference = snapshot
            .candidate(candidate_id)
            .ok_or(RecommendError::CandidateNotFound(candidate_id))?;

        Ok(rank_similar(reference, &snapshot.candidates, limit))
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::factors::{CollaborativeModel, LatentFactorModel};
    use crate::core::skills::materialize_skills;
    use crate::models::{
        Availability, GenderPreference, Household, RatingLog, RatingRecord, Skill, SkillFlags,
    };

    fn create_candidate(id: u32, skills: &[Skill], region: &str, gender: &str, rating: f64) -> Candidate {
        Candidate {
            id,
            name: format!("AuPair_{}", id),
            age: 20 + (id % 8) as u8,
            gender: gender.to_string(),
            region: region.to_string(),
            availability: Availability::Available,
            rating,
            experience_years: (id % 5) as u8,
            skill_flags: SkillFlags::from_skills(skills),
            skills: None,
        }
    }

    fn create_snapshot(collaborative: CollaborativeModel) -> ModelSnapshot {
        let mut candidates = vec![
            create_candidate(1, &[Skill::Cooking, Skill::Computer], "DKI Jakarta", "Perempuan", 4.5),
            create_candidate(2, &[Skill::Cooking], "Jawa Barat", "Perempuan", 4.0),
            create_candidate(3, &[Skill::Music], "Jawa Timur", "Laki-laki", 3.0),
            create_candidate(4, &[Skill::Computer], "DKI Jakarta", "Laki-laki", 5.0),
            create_candidate(5, &[], "Bali", "Perempuan", 2.0),
        ];
        candidates[4].availability = Availability::Busy;
        materialize_skills(&mut candidates);

        ModelSnapshot {
            candidates,
            households: vec![Household {
                id: 1,
                family_name: "Family_1".to_string(),
                region: "DKI Jakarta".to_string(),
                skill_preference: "Memasak, Komputer".to_string(),
                gender_preference: GenderPreference::from("Perempuan"),
                monthly_budget: 3_000_000,
            }],
            ratings: RatingLog::new(vec![
                RatingRecord { household_id: 1, candidate_id: 1, rating: 5 },
                RatingRecord { household_id: 1, candidate_id: 3, rating: 2 },
            ]),
            collaborative,
        }
    }

    fn fitted() -> CollaborativeModel {
        CollaborativeModel::Fitted(
            LatentFactorModel::new(3.0)
                .with_household(1, 0.2, vec![0.5, 0.5])
                .with_candidate(2, 0.3, vec![1.0, 0.0])
                .with_candidate(4, 0.8, vec![0.0, 1.0]),
        )
    }

    fn requirements() -> Requirements {
        Requirements {
            skills: vec!["Memasak".to_string(), "Komputer".to_string()],
            location: "Jakarta".to_string(),
            gender: GenderPreference::from("Perempuan"),
        }
    }

    #[test]
    fn test_hybrid_without_model_is_content_times_weight() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(CollaborativeModel::Unfitted);

        assert_eq!(
            recommender.score_collaborative(&snapshot, 1, 10),
            Err(RecommendError::CollaborativeUnavailable)
        );

        let content = recommender.score_content(&snapshot, &requirements(), 20).unwrap();
        let hybrid = recommender.score_hybrid(&snapshot, 1, &requirements(), 10).unwrap();

        assert_eq!(hybrid.algorithm, Algorithm::Hybrid);
        assert_eq!(hybrid.items.len(), content.items.len());
        for item in &hybrid.items {
            let content_score = content
                .items
                .iter()
                .find(|c| c.id == item.id)
                .map(|c| c.compatibility_score)
                .unwrap();
            assert_eq!(item.compatibility_score, (content_score * 0.6 * 10.0).round() / 10.0);
        }
    }

    #[test]
    fn test_hybrid_is_union_of_both_sides() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(fitted());
        let limit = 2;

        let content = recommender.score_content(&snapshot, &requirements(), limit * 2).unwrap();
        let collaborative = recommender.score_collaborative(&snapshot, 1, limit * 2).unwrap();
        let hybrid = recommender.score_hybrid(&snapshot, 1, &requirements(), 10).unwrap();

        for item in content.items.iter().chain(collaborative.items.iter()) {
            assert!(hybrid.items.iter().any(|h| h.id == item.id));
        }
        assert!(hybrid.items.iter().all(|h| h.id != 5));
    }

    #[test]
    fn test_collaborative_skips_rated_pairs() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(fitted());

        let result = recommender.score_collaborative(&snapshot, 1, 10).unwrap();

        let ids: Vec<u32> = result.items.iter().map(|item| item.id).collect();
        // 3.0 + 0.2 + 0.8 + 0.5 = 4.5 for au pair 4, 3.0 + 0.2 + 0.3 + 0.5 = 4.0 for au pair 2
        assert_eq!(ids, vec![4, 2]);
        assert_eq!(result.items[0].compatibility_score, 90.0);
        assert_eq!(result.items[1].compatibility_score, 80.0);
    }

    #[test]
    fn test_recommend_dispatch_errors() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(fitted());

        let request = RecommendRequest {
            algorithm: Some("popular".to_string()),
            ..Default::default()
        };
        assert_eq!(
            recommender.recommend(&snapshot, &request),
            Err(RecommendError::UnknownAlgorithm("popular".to_string()))
        );

        let request = RecommendRequest {
            algorithm: Some("collaborative".to_string()),
            parent_id: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            recommender.recommend(&snapshot, &request),
            Err(RecommendError::MissingArgument(_))
        ));

        let request = RecommendRequest::default();
        assert!(matches!(
            recommender.recommend(&snapshot, &request),
            Err(RecommendError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_recommend_content_needs_no_parent() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(CollaborativeModel::Unfitted);

        let request = RecommendRequest {
            algorithm: Some("content".to_string()),
            parent_requirements: requirements(),
            ..Default::default()
        };
        let result = recommender.recommend(&snapshot, &request).unwrap();

        assert_eq!(result.algorithm, Algorithm::Content);
        assert_eq!(result.items[0].id, 1);
        assert_eq!(result.items[0].compatibility_score, 99.0);
    }

    #[test]
    fn test_limit_beyond_pool_returns_eligible_count() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(CollaborativeModel::Unfitted);

        let result = recommender.score_content(&snapshot, &requirements(), 100).unwrap();

        assert_eq!(result.items.len(), 4);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(fitted());

        let first = recommender.score_hybrid(&snapshot, 1, &requirements(), 10).unwrap();
        let second = recommender.score_hybrid(&snapshot, 1, &requirements(), 10).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_household_requirements_are_derived() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(CollaborativeModel::Unfitted);

        let direct = recommender.score_content(&snapshot, &requirements(), 10).unwrap();
        let derived = recommender
            .recommend_for_household(&snapshot, 1, Algorithm::Content, 10)
            .unwrap();
        assert_eq!(direct, derived);

        assert_eq!(
            recommender.recommend_for_household(&snapshot, 42, Algorithm::Content, 10),
            Err(RecommendError::HouseholdNotFound(42))
        );
    }

    #[test]
    fn test_custom_filters_apply_before_scoring() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(CollaborativeModel::Unfitted);

        let request = CustomRecommendRequest {
            requirements: requirements(),
            min_rating: Some(4.5),
            limit: 10,
            ..Default::default()
        };
        let result = recommender.recommend_custom(&snapshot, &request).unwrap();

        let ids: Vec<u32> = result.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_similar_unknown_reference() {
        let recommender = Recommender::with_default_weights();
        let snapshot = create_snapshot(CollaborativeModel::Unfitted);

        assert_eq!(
            recommender.similar(&snapshot, 99, 5),
            Err(RecommendError::CandidateNotFound(99))
        );
        assert_eq!(recommender.similar(&snapshot, 1, 5).unwrap().len(), 3);
    }

    #[test]
    fn test_zero_overfetch_still_fills_limit() {
        let mut weights = ScoringWeights::default();
        weights.blend.overfetch = 0;
        let recommender = Recommender::new(weights);
        let snapshot = create_snapshot(fitted());

        let result = recommender.score_hybrid(&snapshot, 1, &requirements(), 3).unwrap();

        assert_eq!(recommender.weights().blend.overfetch, 0);
        assert_eq!(result.items.len(), 3);
    }
}
