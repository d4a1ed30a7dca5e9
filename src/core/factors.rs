use crate::models::{CandidateId, HouseholdId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Anything that can estimate the rating a household would give a candidate
pub trait RatingPredictor {
    /// Estimated rating, expected within the model's rating scale
    fn predict(&self, household_id: HouseholdId, candidate_id: CandidateId) -> f64;
}

/// Bias and latent vector for one household or candidate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorEntry {
    #[serde(default)]
    pub bias: f64,
    #[serde(default)]
    pub factors: Vec<f64>,
}

/// Pre-fit biased matrix factorization
///
/// Prediction follows the usual biased SVD estimate:
/// `mean + b_household + b_candidate + p_household · q_candidate`.
/// An unknown household or candidate contributes neither bias nor factors,
/// and the estimate is clipped to the rating scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatentFactorModel {
    pub global_mean: f64,
    #[serde(default = "default_rating_scale")]
    pub rating_scale: (f64, f64),
    #[serde(default)]
    pub households: HashMap<HouseholdId, FactorEntry>,
    #[serde(default)]
    pub candidates: HashMap<CandidateId, FactorEntry>,
}

fn default_rating_scale() -> (f64, f64) {
    (1.0, 5.0)
}

impl LatentFactorModel {
    pub fn new(global_mean: f64) -> Self {
        Self {
            global_mean,
            rating_scale: default_rating_scale(),
            households: HashMap::new(),
            candidates: HashMap::new(),
        }
    }

    pub fn with_household(mut self, id: HouseholdId, bias: f64, factors: Vec<f64>) -> Self {
        self.households.insert(id, FactorEntry { bias, factors });
        self
    }

    pub fn with_candidate(mut self, id: CandidateId, bias: f64, factors: Vec<f64>) -> Self {
        self.candidates.insert(id, FactorEntry { bias, factors });
        self
    }
}

impl RatingPredictor for LatentFactorModel {
    fn predict(&self, household_id: HouseholdId, candidate_id: CandidateId) -> f64 {
        let household = self.households.get(&household_id);
        let candidate = self.candidates.get(&candidate_id);

        let mut estimate = self.global_mean;
        if let Some(h) = household {
            estimate += h.bias;
        }
        if let Some(c) = candidate {
            estimate += c.bias;
        }
        if let (Some(h), Some(c)) = (household, candidate) {
            estimate += h
                .factors
                .iter()
                .zip(&c.factors)
                .map(|(p, q)| p * q)
                .sum::<f64>();
        }

        let (low, high) = self.rating_scale;
        estimate.max(low).min(high)
    }
}

/// Collaborative model state: either a fitted predictor or nothing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborativeModel {
    Fitted(LatentFactorModel),
    #[default]
    Unfitted,
}

impl CollaborativeModel {
    pub fn is_fitted(&self) -> bool {
        matches!(self, CollaborativeModel::Fitted(_))
    }

    /// The predictor, if one was fit
    pub fn predictor(&self) -> Option<&dyn RatingPredictor> {
        match self {
            CollaborativeModel::Fitted(model) => Some(model),
            CollaborativeModel::Unfitted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> LatentFactorModel {
        LatentFactorModel::new(3.0)
            .with_household(1, 0.5, vec![1.0, 0.0])
            .with_candidate(10, -0.25, vec![0.5, 2.0])
    }

    #[test]
    fn test_known_pair_uses_all_terms() {
        // 3.0 + 0.5 - 0.25 + (1.0 * 0.5 + 0.0 * 2.0)
        assert!((model().predict(1, 10) - 3.75).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_household_uses_candidate_bias_only() {
        assert!((model().predict(99, 10) - 2.75).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_pair_falls_back_to_mean() {
        assert!((model().predict(99, 99) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_prediction_is_clipped() {
        let model = LatentFactorModel::new(4.8).with_household(1, 1.0, vec![]);
        assert_eq!(model.predict(1, 1), 5.0);

        let model = LatentFactorModel::new(1.2).with_candidate(1, -1.0, vec![]);
        assert_eq!(model.predict(1, 1), 1.0);
    }

    #[test]
    fn test_unfitted_has_no_predictor() {
        assert!(CollaborativeModel::Unfitted.predictor().is_none());
        assert!(CollaborativeModel::Fitted(model()).predictor().is_some());
    }

    #[test]
    fn test_model_state_json() {
        let unfitted: CollaborativeModel = serde_json::from_str(r#""unfitted""#).unwrap();
        assert_eq!(unfitted, CollaborativeModel::Unfitted);

        let fitted: CollaborativeModel = serde_json::from_str(
            r#"{"fitted":{"global_mean":3.5,"households":{"2":{"bias":0.1,"factors":[0.2]}}}}"#,
        )
        .unwrap();
        match fitted {
            CollaborativeModel::Fitted(model) => {
                assert_eq!(model.rating_scale, (1.0, 5.0));
                assert!(model.households.contains_key(&2));
            }
            CollaborativeModel::Unfitted => panic!("expected fitted model"),
        }
    }

    #[test]
    fn test_inverted_scale_does_not_panic() {
        let mut inverted = model();
        inverted.rating_scale = (5.0, 1.0);

        assert_eq!(inverted.predict(1, 10), 1.0);
    }
}
