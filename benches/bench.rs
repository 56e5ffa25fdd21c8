// Criterion benchmarks for Wisdom Bridge

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use wisdom_bridge::core::filters::matches_search;
use wisdom_bridge::core::prompts::format_mentor_catalogue;
use wisdom_bridge::core::scoring::{calculate_relevance_score, tokenize};
use wisdom_bridge::models::{MentorProfile, ScoringWeights};
use wisdom_bridge::services::default_mentors;

fn create_catalogue(size: usize) -> Vec<MentorProfile> {
    let seed = default_mentors();
    (0..size)
        .map(|i| {
            let mut mentor = seed[i % seed.len()].clone();
            mentor.id = format!("mentor-{}", i);
            mentor
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [10, 100, 1000] {
        let catalogue = create_catalogue(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalogue, |b, catalogue| {
            b.iter(|| {
                catalogue
                    .iter()
                    .filter(|m| matches_search(m, black_box("python")))
                    .count()
            });
        });
    }

    group.finish();
}

fn bench_lexical_scoring(c: &mut Criterion) {
    let catalogue = create_catalogue(1000);
    let weights = ScoringWeights::default();
    let terms = tokenize("I want a mentor for Python web development and startup marketing");

    c.bench_function("lexical_score_1000", |b| {
        b.iter(|| {
            catalogue
                .iter()
                .map(|m| calculate_relevance_score(m, black_box(&terms), &weights).0)
                .fold(0.0, f64::max)
        });
    });
}

fn bench_catalogue_prompt(c: &mut Criterion) {
    let catalogue = create_catalogue(100);

    c.bench_function("format_catalogue_100", |b| {
        b.iter(|| format_mentor_catalogue(black_box(&catalogue)));
    });
}

criterion_group!(benches, bench_search, bench_lexical_scoring, bench_catalogue_prompt);
criterion_main!(benches);
