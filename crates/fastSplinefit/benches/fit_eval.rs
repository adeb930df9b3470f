//! Spline fitting and evaluation benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Fit scalability (interpolation and smoothing, 100 to 5K points)
//! - Spline degree
//! - Evaluation throughput on dense grids, parallel vs serial
//!
//! For serial execution, use `FASTSPLINEFIT_MODE=serial cargo bench`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fastSplinefit::prelude::*;
use rand::prelude::*;
use rand_distr::Normal;
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn parallel_mode() -> (bool, &'static str) {
    match env::var("FASTSPLINEFIT_MODE").ok().as_deref() {
        Some("serial") => (false, "serial"),
        _ => (true, "parallel"),
    }
}

/// Generate smooth sinusoidal data with Gaussian noise.
fn generate_sine_data(size: usize, seed: u64, sigma: f64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, sigma).unwrap();

    let x: Vec<f64> = (0..size).map(|i| i as f64 * 10.0 / size as f64).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&xi| xi.sin() + noise_dist.sample(&mut rng))
        .collect();
    (x, y)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_fit_scalability(c: &mut Criterion) {
    let (parallel, label) = parallel_mode();
    let mut group = c.benchmark_group(format!("fit_scalability_{}", label));
    group.sample_size(20);

    for size in [100, 500, 1_000, 5_000] {
        let (x, y) = generate_sine_data(size, 42, 0.1);
        // Expected residual sum for sigma = 0.1 is m * sigma^2.
        let smoothing = size as f64 * 0.01;
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("smoothing", size), &size, |b, _| {
            let model = Spline::new()
                .smoothing(smoothing)
                .adapter(Batch)
                .parallel(parallel)
                .build()
                .unwrap();
            b.iter(|| model.fit(black_box(&x), black_box(&y)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("interpolation", size), &size, |b, _| {
            let model = Spline::new()
                .adapter(Batch)
                .parallel(parallel)
                .build()
                .unwrap();
            b.iter(|| model.fit(black_box(&x), black_box(&y)).unwrap());
        });
    }

    group.finish();
}

fn bench_degree(c: &mut Criterion) {
    let (parallel, label) = parallel_mode();
    let mut group = c.benchmark_group(format!("degree_{}", label));
    group.sample_size(30);

    let (x, y) = generate_sine_data(1_000, 7, 0.1);

    for degree in 1..=5 {
        group.bench_with_input(BenchmarkId::new("smoothing", degree), &degree, |b, &k| {
            let model = Spline::new()
                .degree(k)
                .smoothing(10.0)
                .adapter(Batch)
                .parallel(parallel)
                .build()
                .unwrap();
            b.iter(|| model.fit(black_box(&x), black_box(&y)).unwrap());
        });
    }

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    group.sample_size(50);

    let (x, y) = generate_sine_data(2_000, 11, 0.1);
    let curve = Spline::new()
        .smoothing(20.0)
        .adapter(Batch)
        .build()
        .unwrap()
        .fit(&x, &y)
        .unwrap()
        .curve;

    for size in [1_000, 100_000, 1_000_000] {
        let grid: Vec<f64> = (0..size)
            .map(|i| i as f64 * 9.99 / size as f64)
            .collect();
        group.throughput(Throughput::Elements(size as u64));

        for (parallel, label) in [(true, "parallel"), (false, "serial")] {
            let model = Spline::<f64>::new()
                .adapter(Batch)
                .parallel(parallel)
                .build()
                .unwrap();
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| model.evaluate(&curve, black_box(&grid)).unwrap());
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_fit_scalability, bench_degree, bench_evaluation);
criterion_main!(benches);
