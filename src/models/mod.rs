// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod snapshot;

pub use domain::{
    parse_skill_preference, Algorithm, Availability, BlendWeights, Candidate, CandidateId,
    ContentWeights, GenderPreference, Household, HouseholdId, RatingLog, RatingRecord,
    RecommendationItem, Recommendations, Requirements, ScoringWeights, SimilarCandidate, Skill,
    SkillFlags, NO_GENDER_PREFERENCE,
};
pub use requests::{CustomRecommendRequest, HouseholdQuery, RecommendRequest, SimilarQuery};
pub use responses::{
    ErrorResponse, HealthResponse, MessageResponse, RecommendationResponse, SimilarResponse,
    StatusResponse,
};
pub use snapshot::{ModelSnapshot, SnapshotSummary};
