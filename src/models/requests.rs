use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{HouseholdId, Requirements};

/// Parameters of a recommendation run, as accepted by the CLI and `POST /recommendations`
///
/// ```json
/// {
///   "algorithm": "hybrid",
///   "limit": 10,
///   "parent_id": 3,
///   "parent_requirements": { "skills": ["Memasak"], "location": "Jakarta", "gender": "Perempuan" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    /// Kept as text so an unknown selector becomes a structured failure instead of a parse error
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 50))]
    pub limit: usize,
    #[serde(default, alias = "parentId")]
    pub parent_id: Option<HouseholdId>,
    #[serde(default, alias = "parentRequirements")]
    pub parent_requirements: Requirements,
}

impl Default for RecommendRequest {
    fn default() -> Self {
        Self {
            algorithm: None,
            limit: default_limit(),
            parent_id: None,
            parent_requirements: Requirements::default(),
        }
    }
}

fn default_limit() -> usize {
    10
}

fn default_similar_limit() -> usize {
    5
}

/// Query for `GET /recommendations/household/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HouseholdQuery {
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 50))]
    pub limit: usize,
}

/// Content recommendations restricted by hard filters
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CustomRecommendRequest {
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default)]
    #[validate(range(min = 1.0, max = 5.0))]
    pub min_rating: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 16, max = 50))]
    pub max_age: Option<u8>,
    #[serde(default)]
    #[validate(range(min = 0, max = 10))]
    pub min_experience: Option<u8>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 50))]
    pub limit: usize,
}

/// Query for `GET /recommendations/similar/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimilarQuery {
    #[serde(default = "default_similar_limit")]
    #[validate(range(min = 1, max = 20))]
    pub limit: usize,
}
