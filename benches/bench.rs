// Criterion benchmarks for Aupair Match

use aupair_match::core::{blend, derive_skill_tags, rank_by_content};
use aupair_match::models::{
    Availability, BlendWeights, Candidate, ContentWeights, GenderPreference, Household,
    ModelSnapshot, RatingLog, RatingRecord, Requirements, Skill, SkillFlags,
};
use aupair_match::{CollaborativeModel, LatentFactorModel, Recommender};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const REGIONS: [&str; 4] = ["DKI Jakarta", "Jawa Barat", "Banten", "Jawa Tengah"];

fn create_candidate(id: usize) -> Candidate {
    let skills: Vec<Skill> = Skill::ALL
        .iter()
        .copied()
        .enumerate()
        .filter(|(i, _)| (id + i) % 3 == 0)
        .map(|(_, skill)| skill)
        .collect();
    let skill_flags = SkillFlags::from_skills(&skills);

    Candidate {
        id: id as u32,
        name: format!("AuPair_{}", id),
        age: 19 + (id % 12) as u8,
        gender: if id % 2 == 0 { "Perempuan" } else { "Laki-laki" }.to_string(),
        region: REGIONS[id % REGIONS.len()].to_string(),
        availability: if id % 7 == 0 { Availability::Busy } else { Availability::Available },
        rating: 3.0 + (id % 20) as f64 / 10.0,
        experience_years: (id % 8) as u8,
        skill_flags,
        skills: Some(derive_skill_tags(&skill_flags)),
    }
}

fn create_requirements() -> Requirements {
    Requirements {
        skills: vec!["Memasak".to_string(), "First-Aid".to_string(), "Berenang".to_string()],
        location: "Jakarta".to_string(),
        gender: GenderPreference::from("Perempuan"),
    }
}

fn create_snapshot(candidate_count: usize) -> ModelSnapshot {
    let candidates: Vec<Candidate> = (1..=candidate_count).map(create_candidate).collect();

    let mut model = LatentFactorModel::new(3.8).with_household(1, 0.1, vec![0.3, 0.2, 0.1]);
    for candidate in &candidates {
        let seed = candidate.id as f64;
        model = model.with_candidate(
            candidate.id,
            (seed % 5.0) / 10.0 - 0.2,
            vec![(seed % 3.0) / 10.0, (seed % 4.0) / 10.0, (seed % 5.0) / 10.0],
        );
    }

    let ratings = (1..=candidate_count.min(20))
        .step_by(4)
        .map(|id| RatingRecord { household_id: 1, candidate_id: id as u32, rating: 4 })
        .collect();

    ModelSnapshot {
        candidates,
        households: vec![Household {
            id: 1,
            family_name: "Keluarga Bench".to_string(),
            region: "DKI Jakarta".to_string(),
            skill_preference: "Memasak First-Aid Berenang".to_string(),
            gender_preference: GenderPreference::from("Perempuan"),
            monthly_budget: 3_000_000,
        }],
        ratings: RatingLog::new(ratings),
        collaborative: CollaborativeModel::Fitted(model),
    }
}

fn bench_content_ranking(c: &mut Criterion) {
    let requirements = create_requirements();
    let weights = ContentWeights::default();

    let mut group = c.benchmark_group("content");

    for candidate_count in [10, 100, 1000, 5000].iter() {
        let snapshot = create_snapshot(*candidate_count);

        group.bench_with_input(
            BenchmarkId::new("rank_by_content", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    rank_by_content(
                        black_box(&snapshot.candidates),
                        black_box(&requirements),
                        black_box(&weights),
                        black_box(20),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_hybrid(c: &mut Criterion) {
    let recommender = Recommender::with_default_weights();
    let requirements = create_requirements();

    let mut group = c.benchmark_group("hybrid");

    for candidate_count in [10, 100, 1000, 5000].iter() {
        let snapshot = create_snapshot(*candidate_count);

        group.bench_with_input(
            BenchmarkId::new("score_hybrid", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    recommender.score_hybrid(
                        black_box(&snapshot),
                        black_box(1),
                        black_box(&requirements),
                        black_box(10),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_blend(c: &mut Criterion) {
    let snapshot = create_snapshot(200);
    let recommender = Recommender::with_default_weights();
    let content = recommender
        .score_content(&snapshot, &create_requirements(), 100)
        .map(|r| r.items)
        .unwrap_or_default();
    let collaborative = recommender
        .score_collaborative(&snapshot, 1, 100)
        .map(|r| r.items)
        .ok();
    let weights = BlendWeights::default();

    c.bench_function("blend_100_plus_100", |b| {
        b.iter(|| {
            blend(
                black_box(content.clone()),
                black_box(collaborative.clone()),
                black_box(&weights),
                black_box(10),
            )
        });
    });
}

criterion_group!(benches, bench_content_ranking, bench_hybrid, bench_blend);

criterion_main!(benches);
