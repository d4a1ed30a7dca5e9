use crate::core::filters::round_one_decimal;
use crate::models::{Candidate, SimilarCandidate, Skill, SkillFlags};

/// Provinces considered close to each other
const NEIGHBOURING_PROVINCES: &[(&str, &[&str])] = &[
    ("DKI Jakarta", &["Jawa Barat", "Banten"]),
    ("Jawa Barat", &["DKI Jakarta", "Jawa Tengah"]),
    ("Jawa Tengah", &["Jawa Barat", "Jawa Timur", "DI Yogyakarta"]),
    ("DI Yogyakarta", &["Jawa Tengah"]),
    ("Jawa Timur", &["Jawa Tengah"]),
];

/// Calculate how alike two au pairs are (0-100)
///
/// Similarity formula:
/// score = (
///     skill_similarity * 0.4 +
///     location_similarity * 0.3 +
///     age_similarity * 0.2 +
///     rating_similarity * 0.1
/// )
pub fn calculate_similarity(reference: &Candidate, other: &Candidate) -> f64 {
    let skills = skill_similarity(&reference.skill_flags, &other.skill_flags);
    let location = location_similarity(&reference.region, &other.region);

    let age_diff = (reference.age as f64 - other.age as f64).abs();
    let age = (1.0 - age_diff / 10.0).max(0.0);

    let rating_diff = (reference.rating - other.rating).abs();
    let rating = (1.0 - rating_diff / 2.0).max(0.0);

    round_one_decimal((skills * 0.4 + location * 0.3 + age * 0.2 + rating * 0.1) * 100.0)
}

/// Fraction of skills held by either au pair that both share; 0.5 when neither has any
#[inline]
fn skill_similarity(a: &SkillFlags, b: &SkillFlags) -> f64 {
    let (shared, total) = Skill::ALL
        .iter()
        .filter(|skill| a.has(**skill) || b.has(**skill))
        .fold((0usize, 0usize), |(shared, total), skill| {
            let both = a.has(*skill) && b.has(*skill);
            (shared + both as usize, total + 1)
        });

    if total == 0 {
        0.5
    } else {
        shared as f64 / total as f64
    }
}

/// 1.0 for the same province, 0.7 for a neighbouring one, 0.3 otherwise
#[inline]
fn location_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.3;
    }

    if a.eq_ignore_ascii_case(b) {
        return 1.0;
    }

    let neighbours = NEIGHBOURING_PROVINCES
        .iter()
        .find(|(province, _)| province.eq_ignore_ascii_case(a))
        .map(|(_, neighbours)| *neighbours)
        .unwrap_or(&[]);

    if neighbours.iter().any(|n| n.eq_ignore_ascii_case(b)) {
        0.7
    } else {
        0.3
    }
}

/// Rank the other available au pairs by similarity to `reference`
pub fn rank_similar(reference: &Candidate, candidates: &[Candidate], limit: usize) -> Vec<SimilarCandidate> {
    let mut similar: Vec<SimilarCandidate> = candidates
        .iter()
        .filter(|candidate| candidate.is_available() && candidate.id != reference.id)
        .map(|candidate| SimilarCandidate {
            id: candidate.id,
            name: candidate.name.clone(),
            age: candidate.age,
            gender: candidate.gender.clone(),
            location: candidate.region.clone(),
            skills: candidate.skills.clone().unwrap_or_default(),
            rating: candidate.rating,
            experience: candidate.experience_years,
            similarity_score: calculate_similarity(reference, candidate),
        })
        .collect();

    similar.sort_by(|a, b| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    similar.truncate(limit);
    similar
}
