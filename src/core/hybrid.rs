use crate::core::filters::round_one_decimal;
use crate::models::{BlendWeights, CandidateId, RecommendationItem};
use std::collections::HashMap;

pub const COLLABORATIVE_AGREEMENT: &str = "Similar parents liked this au pair";

/// Candidate being accumulated across both sub-lists
struct BlendEntry {
    item: RecommendationItem,
    combined: f64,
    explanations: Vec<String>,
}

/// Merge content and collaborative results into one ranked list
///
/// The result is the union of both inputs keyed by candidate id, content
/// entries first. A candidate found by both scorers sums its weighted scores;
/// one found by a single scorer keeps only that weighted score. `None` for the
/// collaborative side means every collaborative contribution is zero.
pub fn blend(
    content: Vec<RecommendationItem>,
    collaborative: Option<Vec<RecommendationItem>>,
    weights: &BlendWeights,
    limit: usize,
) -> Vec<RecommendationItem> {
    let mut entries: Vec<BlendEntry> = Vec::with_capacity(content.len());
    let mut index: HashMap<CandidateId, usize> = HashMap::new();

    for item in content {
        let combined = item.compatibility_score * weights.content;
        let explanations = vec![item.explanation.clone()];
        index.insert(item.id, entries.len());
        entries.push(BlendEntry { item, combined, explanations });
    }

    for item in collaborative.unwrap_or_default() {
        let weighted = item.compatibility_score * weights.collaborative;
        match index.get(&item.id) {
            Some(&position) => {
                let entry = &mut entries[position];
                entry.combined += weighted;
                entry.explanations.push(COLLABORATIVE_AGREEMENT.to_string());
            }
            None => {
                let explanations = vec![item.explanation.clone()];
                index.insert(item.id, entries.len());
                entries.push(BlendEntry { item, combined: weighted, explanations });
            }
        }
    }

    let mut blended: Vec<RecommendationItem> = entries
        .into_iter()
        .map(|entry| RecommendationItem {
            compatibility_score: round_one_decimal(entry.combined),
            explanation: entry.explanations.join("; "),
            ..entry.item
        })
        .collect();

    super::sort_by_score(&mut blended);
    blended.truncate(limit);
    blended
}
