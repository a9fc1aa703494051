//! Benchmarks for layout generation and counter formatting.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use heartfield::{format_time, HeartBounds, HeartLayoutGenerator};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let generator = HeartLayoutGenerator::new();

    for count in [60, 600, 6000] {
        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, &count| {
            let mut rng = SmallRng::seed_from_u64(0);
            b.iter(|| black_box(generator.generate_with_rng(count, 10, &mut rng)))
        });
    }

    group.finish();
}

fn bench_bounds(c: &mut Criterion) {
    c.bench_function("heart_bounds_100", |b| {
        b.iter(|| black_box(HeartBounds::sample(black_box(100))))
    });
}

fn bench_format(c: &mut Criterion) {
    c.bench_function("format_time", |b| {
        b.iter(|| black_box(format_time(black_box(31_536_000 + 90061))))
    });
}

criterion_group!(benches, bench_generate, bench_bounds, bench_format);
criterion_main!(benches);
