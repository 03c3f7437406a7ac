//! Benchmarks for similarity scoring
//!
//! Run with: cargo bench --package ranking
//!
//! Scores a synthetic catalog against one reference movie, the CPU-bound
//! part of a recommendation call.

use catalog::MovieRecord;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ranking::similarity::{rank_order, score_candidates};

const GENRES: [&str; 6] = ["Drama", "Comedy", "Action", "Sci-Fi", "Crime", "Horror"];

fn synthetic_catalog(size: u32) -> Vec<MovieRecord> {
    (0..size)
        .map(|i| {
            let genre = (i % 7 != 0).then(|| GENRES[(i % 6) as usize]);
            let year = (i % 11 != 0).then(|| 1950 + (i % 70) as u16);
            MovieRecord::new(format!("Movie {}", i), year, genre)
                .with_actors((0..6).map(|k| format!("Actor {}", (i * 7 + k * 13) % 2000)))
                .with_directors([format!("Director {}", i % 300)])
        })
        .collect()
}

fn bench_score_candidates(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let reference = catalog[0].clone();
    let candidates: Vec<MovieRecord> = catalog[1..].to_vec();

    c.bench_function("score_10k_candidates", |b| {
        b.iter(|| {
            let scored = score_candidates(black_box(&reference), black_box(candidates.clone()));
            black_box(scored)
        })
    });
}

fn bench_score_and_rank(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let reference = catalog[0].clone();
    let candidates: Vec<MovieRecord> = catalog[1..].to_vec();

    c.bench_function("score_and_rank_top5", |b| {
        b.iter(|| {
            let mut scored = score_candidates(black_box(&reference), candidates.clone());
            scored.sort_by(rank_order);
            scored.truncate(5);
            black_box(scored)
        })
    });
}

criterion_group!(benches, bench_score_candidates, bench_score_and_rank);
criterion_main!(benches);
