//! Benchmarks for the hot analysis loops

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use eye_screening::blink::count_blinks;
use eye_screening::eye_metrics::{extract_eye_metrics, LEFT_EYE};
use eye_screening::landmarks::{Landmark, LandmarkSet};
use eye_screening::stats::{population_std, robust_peak_to_peak};

/// Deterministic openness waveform with periodic blink-like dips
fn openness_series(len: usize) -> Vec<Option<f64>> {
    (0..len)
        .map(|i| {
            if i % 37 == 0 {
                None
            } else if i % 25 < 3 {
                Some(0.05)
            } else {
                Some(0.4 + 0.1 * ((i as f64) * 0.21).sin())
            }
        })
        .collect()
}

fn left_eye_landmarks() -> LandmarkSet {
    let mut set = LandmarkSet::new();
    set.insert(33, Landmark::new(0.3, 0.5));
    set.insert(133, Landmark::new(0.4, 0.5));
    set.insert(159, Landmark::new(0.35, 0.48));
    set.insert(145, Landmark::new(0.35, 0.52));
    for index in [474, 475, 476, 477] {
        set.insert(index, Landmark::new(0.35, 0.505));
    }
    set
}

fn benchmark_blink_detection(c: &mut Criterion) {
    let series = openness_series(10_000);
    c.bench_function("count_blinks_10k", |b| {
        b.iter(|| count_blinks(black_box(series.iter().copied()), 0.18, 2));
    });
}

fn benchmark_statistics(c: &mut Criterion) {
    let values: Vec<f64> = (0..10_000).map(|i| ((i as f64) * 0.17).sin() * 0.05).collect();

    c.bench_function("robust_ptp_10k", |b| {
        b.iter(|| robust_peak_to_peak(black_box(&values)));
    });

    c.bench_function("population_std_10k", |b| {
        b.iter(|| population_std(black_box(&values)));
    });
}

fn benchmark_eye_metrics(c: &mut Criterion) {
    let landmarks = left_eye_landmarks();
    c.bench_function("extract_eye_metrics", |b| {
        b.iter(|| extract_eye_metrics(black_box(&landmarks), 1280, 720, &LEFT_EYE));
    });
}

criterion_group!(
    benches,
    benchmark_blink_detection,
    benchmark_statistics,
    benchmark_eye_metrics
);
criterion_main!(benches);
