use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub type CandidateId = u32;
pub type HouseholdId = u32;

/// Sentinel used by households that accept any au pair gender
pub const NO_GENDER_PREFERENCE: &str = "Tidak-Ada-Preferensi";

/// Availability state of an au pair; only `Available` candidates are ever recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Busy,
}

/// The seven skill columns tracked for every au pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Skill {
    Cooking,
    FirstAid,
    Driving,
    Swimming,
    Computer,
    Music,
    Sports,
}

impl Skill {
    /// Catalogue order, which is also the order tags appear in derived skill strings
    pub const ALL: [Skill; 7] = [
        Skill::Cooking,
        Skill::FirstAid,
        Skill::Driving,
        Skill::Swimming,
        Skill::Computer,
        Skill::Music,
        Skill::Sports,
    ];

    /// Tag used in skill strings and household preferences
    pub fn tag(self) -> &'static str {
        match self {
            Skill::Cooking => "Memasak",
            Skill::FirstAid => "First-Aid",
            Skill::Driving => "Mengemudi",
            Skill::Swimming => "Berenang",
            Skill::Computer => "Komputer",
            Skill::Music => "Musik",
            Skill::Sports => "Olahraga",
        }
    }
}

/// Boolean skill columns as stored in the profile table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillFlags {
    #[serde(rename = "memasak", default)]
    pub cooking: bool,
    #[serde(rename = "first_aid", default)]
    pub first_aid: bool,
    #[serde(rename = "mengemudi", default)]
    pub driving: bool,
    #[serde(rename = "berenang", default)]
    pub swimming: bool,
    #[serde(rename = "komputer", default)]
    pub computer: bool,
    #[serde(rename = "musik", default)]
    pub music: bool,
    #[serde(rename = "olahraga", default)]
    pub sports: bool,
}

impl SkillFlags {
    pub fn has(&self, skill: Skill) -> bool {
        match skill {
            Skill::Cooking => self.cooking,
            Skill::FirstAid => self.first_aid,
            Skill::Driving => self.driving,
            Skill::Swimming => self.swimming,
            Skill::Computer => self.computer,
            Skill::Music => self.music,
            Skill::Sports => self.sports,
        }
    }

    /// Skills that are set, in catalogue order
    pub fn iter(&self) -> impl Iterator<Item = Skill> + '_ {
        Skill::ALL.into_iter().filter(move |skill| self.has(*skill))
    }

    pub fn from_skills(skills: &[Skill]) -> Self {
        Self {
            cooking: skills.contains(&Skill::Cooking),
            first_aid: skills.contains(&Skill::FirstAid),
            driving: skills.contains(&Skill::Driving),
            swimming: skills.contains(&Skill::Swimming),
            computer: skills.contains(&Skill::Computer),
            music: skills.contains(&Skill::Music),
            sports: skills.contains(&Skill::Sports),
        }
    }
}

/// Au pair profile as held in the profile store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub region: String,
    pub availability: Availability,
    /// Average rating in 0..=5
    pub rating: f64,
    pub experience_years: u8,
    #[serde(default)]
    pub skill_flags: SkillFlags,
    /// Space-separated skill tags derived from `skill_flags`; `None` until materialized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

impl Candidate {
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Available
    }

    /// Derived skill tags as a set, or `None` if the table was never materialized
    pub fn skill_tags(&self) -> Option<HashSet<&str>> {
        self.skills
            .as_deref()
            .map(|skills| skills.split_whitespace().collect())
    }
}

/// A household's au pair gender preference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum GenderPreference {
    #[default]
    NoPreference,
    Specific(String),
}

impl GenderPreference {
    /// Whether a candidate of `gender` satisfies this preference
    pub fn accepts(&self, gender: &str) -> bool {
        match self {
            GenderPreference::NoPreference => true,
            GenderPreference::Specific(preferred) => preferred == gender,
        }
    }

    pub fn is_specific(&self) -> bool {
        matches!(self, GenderPreference::Specific(_))
    }
}

impl From<String> for GenderPreference {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == NO_GENDER_PREFERENCE {
            GenderPreference::NoPreference
        } else {
            GenderPreference::Specific(trimmed.to_string())
        }
    }
}

impl From<Option<String>> for GenderPreference {
    fn from(value: Option<String>) -> Self {
        value.map(GenderPreference::from).unwrap_or_default()
    }
}

impl From<&str> for GenderPreference {
    fn from(value: &str) -> Self {
        GenderPreference::from(value.to_string())
    }
}

impl From<GenderPreference> for String {
    fn from(value: GenderPreference) -> Self {
        match value {
            GenderPreference::NoPreference => NO_GENDER_PREFERENCE.to_string(),
            GenderPreference::Specific(gender) => gender,
        }
    }
}

impl fmt::Display for GenderPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenderPreference::NoPreference => f.write_str(NO_GENDER_PREFERENCE),
            GenderPreference::Specific(gender) => f.write_str(gender),
        }
    }
}

/// Parent household record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    pub id: HouseholdId,
    pub family_name: String,
    pub region: String,
    /// Free-text skill wish list, e.g. "Memasak Komputer" or "Memasak, Musik"
    #[serde(default)]
    pub skill_preference: String,
    #[serde(default)]
    pub gender_preference: GenderPreference,
    #[serde(default)]
    pub monthly_budget: u64,
}

/// A single historical rating a household gave an au pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub household_id: HouseholdId,
    pub candidate_id: CandidateId,
    pub rating: u8,
}

/// Historical interaction log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingLog {
    records: Vec<RatingRecord>,
}

impl RatingLog {
    pub fn new(records: Vec<RatingRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Candidates the household has already rated
    pub fn rated_by(&self, household_id: HouseholdId) -> HashSet<CandidateId> {
        self.records
            .iter()
            .filter(|record| record.household_id == household_id)
            .map(|record| record.candidate_id)
            .collect()
    }
}

/// What a household asks for when scoring by content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default)]
    pub gender: GenderPreference,
}

/// Treat an explicit JSON `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Requirements {
    /// Requirements a stored household implies: parsed skill wishes, home region and gender preference
    pub fn from_household(household: &Household) -> Self {
        Self {
            skills: parse_skill_preference(&household.skill_preference),
            location: household.region.clone(),
            gender: household.gender_preference.clone(),
        }
    }
}

/// Split a free-text skill preference on whitespace and commas
pub fn parse_skill_preference(preference: &str) -> Vec<String> {
    preference
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

/// One ranked recommendation, produced fresh per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub id: CandidateId,
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub location: String,
    pub skills: String,
    pub rating: f64,
    pub experience: u8,
    pub compatibility_score: f64,
    pub explanation: String,
}

impl RecommendationItem {
    /// Snapshot a candidate into an output record
    pub fn from_candidate(candidate: &Candidate, compatibility_score: f64, explanation: String) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            age: candidate.age,
            gender: candidate.gender.clone(),
            location: candidate.region.clone(),
            skills: candidate.skills.clone().unwrap_or_default(),
            rating: candidate.rating,
            experience: candidate.experience_years,
            compatibility_score,
            explanation,
        }
    }
}

/// A candidate ranked by resemblance to a reference au pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarCandidate {
    pub id: CandidateId,
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub location: String,
    pub skills: String,
    pub rating: f64,
    pub experience: u8,
    pub similarity_score: f64,
}

/// Scoring algorithm selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Content,
    Collaborative,
    #[default]
    Hybrid,
}

impl Algorithm {
    /// Label reported alongside results
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Content => "content-based",
            Algorithm::Collaborative => "collaborative",
            Algorithm::Hybrid => "hybrid",
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = crate::error::RecommendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "content" => Ok(Algorithm::Content),
            "collaborative" => Ok(Algorithm::Collaborative),
            "hybrid" => Ok(Algorithm::Hybrid),
            other => Err(crate::error::RecommendError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Ranked output of one scoring operation
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub items: Vec<RecommendationItem>,
    pub algorithm: Algorithm,
}

/// Content scoring weights, each applied to a `[0,1]` component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentWeights {
    pub skills: f64,
    pub location: f64,
    pub gender: f64,
    pub rating: f64,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            skills: 0.6,
            location: 0.2,
            gender: 0.1,
            rating: 0.1,
        }
    }
}

/// Hybrid blend weights and collaborative scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub content: f64,
    pub collaborative: f64,
    /// Multiplier from predicted rating (1..=5) to a compatibility score
    pub collaborative_scale: f64,
    /// How many times the requested limit each sub-scorer is asked for
    pub overfetch: usize,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            content: 0.6,
            collaborative: 0.4,
            collaborative_scale: 20.0,
            overfetch: 2,
        }
    }
}

/// All scoring weights used by the recommender
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoringWeights {
    pub content: ContentWeights,
    pub blend: BlendWeights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_preference_sentinel() {
        assert_eq!(GenderPreference::from(""), GenderPreference::NoPreference);
        assert_eq!(
            GenderPreference::from(NO_GENDER_PREFERENCE),
            GenderPreference::NoPreference
        );
        assert_eq!(
            GenderPreference::from("Perempuan"),
            GenderPreference::Specific("Perempuan".to_string())
        );
        assert!(GenderPreference::NoPreference.accepts("Laki-laki"));
        assert!(!GenderPreference::from("Perempuan").accepts("Laki-laki"));
    }

    #[test]
    fn test_null_requirements_mean_no_preference() {
        let requirements: Requirements =
            serde_json::from_str(r#"{"skills":null,"location":null,"gender":null}"#).unwrap();

        assert_eq!(requirements, Requirements::default());
        assert_eq!(requirements.gender, GenderPreference::NoPreference);
    }

    #[test]
    fn test_parse_skill_preference() {
        assert_eq!(
            parse_skill_preference("Memasak, Komputer  Musik"),
            vec!["Memasak", "Komputer", "Musik"]
        );
        assert!(parse_skill_preference("  ").is_empty());
    }

    #[test]
    fn test_rated_by() {
        let log = RatingLog::new(vec![
            RatingRecord { household_id: 1, candidate_id: 3, rating: 4 },
            RatingRecord { household_id: 2, candidate_id: 5, rating: 2 },
            RatingRecord { household_id: 1, candidate_id: 7, rating: 5 },
        ]);

        let rated = log.rated_by(1);
        assert_eq!(rated.len(), 2);
        assert!(rated.contains(&3) && rated.contains(&7));
        assert!(log.rated_by(9).is_empty());
    }

    #[test]
    fn test_algorithm_selector() {
        assert_eq!("content".parse::<Algorithm>().unwrap(), Algorithm::Content);
        assert_eq!(Algorithm::Content.label(), "content-based");
        assert!("popular".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_skill_flags_order() {
        let flags = SkillFlags::from_skills(&[Skill::Music, Skill::Cooking]);
        let tags: Vec<_> = flags.iter().map(Skill::tag).collect();
        assert_eq!(tags, vec!["Memasak", "Musik"]);
    }
}
