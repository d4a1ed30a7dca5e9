use crate::core::factors::CollaborativeModel;
use crate::models::domain::{Candidate, CandidateId, Household, HouseholdId, RatingLog};
use serde::{Deserialize, Serialize};

/// Immutable view of everything a scoring run reads
///
/// Loaded once per invocation and passed by reference into every scorer;
/// nothing in the scoring path mutates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSnapshot {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub households: Vec<Household>,
    #[serde(default)]
    pub ratings: RatingLog,
    #[serde(default)]
    pub collaborative: CollaborativeModel,
}

impl ModelSnapshot {
    pub fn candidate(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    pub fn household(&self, id: HouseholdId) -> Option<&Household> {
        self.households.iter().find(|household| household.id == id)
    }

    /// Whether every candidate carries its derived skill tags
    pub fn is_materialized(&self) -> bool {
        self.candidates.iter().all(|candidate| candidate.skills.is_some())
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            candidates: self.candidates.len(),
            available_candidates: self.candidates.iter().filter(|c| c.is_available()).count(),
            households: self.households.len(),
            ratings: self.ratings.len(),
            collaborative: self.collaborative.is_fitted(),
            materialized: self.is_materialized(),
        }
    }
}

/// Counts reported by status and health checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub candidates: usize,
    pub available_candidates: usize,
    pub households: usize,
    pub ratings: usize,
    pub collaborative: bool,
    pub materialized: bool,
}
