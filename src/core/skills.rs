use crate::models::{Candidate, Skill, SkillFlags};

/// Derive the space-separated tag string for a set of skill flags
pub fn derive_skill_tags(flags: &SkillFlags) -> String {
    flags.iter().map(Skill::tag).collect::<Vec<_>>().join(" ")
}

/// Fill in the derived skill tags of every candidate
///
/// Returns how many candidates were updated. Existing tags are recomputed so
/// the field always agrees with the flags.
pub fn materialize_skills(candidates: &mut [Candidate]) -> usize {
    let mut updated = 0;
    for candidate in candidates.iter_mut() {
        let tags = derive_skill_tags(&candidate.skill_flags);
        if candidate.skills.as_deref() != Some(tags.as_str()) {
            candidate.skills = Some(tags);
            updated += 1;
        }
    }
    updated
}
