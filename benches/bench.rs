//! Criterion benchmarks for typofix.
//!
//! Covers candidate generation, model building and correction with a cold
//! and a warm cache.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use typofix::spelling::{CandidateGenerator, Corrector, FrequencyModel};

/// Generate a corpus of roughly `count` words.
fn generate_corpus(count: usize) -> String {
    let words = [
        "spelling",
        "correction",
        "frequency",
        "candidate",
        "generator",
        "vocabulary",
        "probability",
        "deletion",
        "insertion",
        "substitution",
        "transposition",
        "the",
        "of",
        "and",
        "a",
        "to",
        "in",
        "is",
        "that",
        "for",
        "word",
        "words",
        "corpus",
        "model",
    ];

    let mut corpus = String::with_capacity(count * 8);
    for i in 0..count {
        // Skew the distribution so some words are far more common
        let word = words[(i * i + i / 3) % words.len()];
        corpus.push_str(word);
        corpus.push(if i % 17 == 16 { '\n' } else { ' ' });
    }
    corpus
}

/// Benchmark candidate generation.
fn bench_candidate_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_generation");
    let generator = CandidateGenerator::new();

    group.bench_function("edits1", |b| {
        b.iter(|| black_box(generator.edits1(black_box("speling"))))
    });

    group.sample_size(10); // Second-level edits are expensive
    group.bench_function("edits2", |b| {
        b.iter(|| black_box(generator.edits2(black_box("speling"))))
    });

    group.finish();
}

/// Benchmark model construction.
fn bench_model_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_build");
    let corpus = generate_corpus(10_000);

    group.throughput(Throughput::Bytes(corpus.len() as u64));
    group.bench_function("build_10k_words", |b| {
        b.iter(|| black_box(FrequencyModel::build(black_box(corpus.as_bytes())).unwrap()))
    });

    group.finish();
}

/// Benchmark spell correction.
fn bench_spell_correction(c: &mut Criterion) {
    let mut group = c.benchmark_group("spell_correction");
    group.sample_size(20); // Reduce sample size for faster execution

    let model = Arc::new(FrequencyModel::build(generate_corpus(10_000).as_bytes()).unwrap());
    let misspellings = vec!["speling", "corection", "frequncy", "vocabualry", "wrds"];

    // Every iteration starts from an empty cache
    group.bench_function("correct_cold_cache", |b| {
        b.iter_batched(
            || Corrector::new(Arc::clone(&model)),
            |mut corrector| black_box(corrector.correct(black_box("speling"))),
            BatchSize::SmallInput,
        )
    });

    let mut warm = Corrector::new(Arc::clone(&model));
    for word in &misspellings {
        warm.correct(word);
    }
    group.throughput(Throughput::Elements(misspellings.len() as u64));
    group.bench_function("correct_warm_cache", |b| {
        b.iter(|| {
            for word in &misspellings {
                let result = warm.correct(black_box(word));
                black_box(result);
            }
        })
    });

    group.bench_function("correct_batch_cold_cache", |b| {
        b.iter_batched(
            || Corrector::new(Arc::clone(&model)),
            |mut corrector| black_box(corrector.correct_batch(black_box(&misspellings))),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_candidate_generation, bench_model_build);

// Separate group for slower benchmarks
criterion_group!(slow_benches, bench_spell_correction);

criterion_main!(benches, slow_benches);
