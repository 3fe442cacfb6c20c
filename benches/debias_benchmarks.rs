use criterion::{black_box, criterion_group, criterion_main, Criterion};
use debias::corrector::CorrectionMethod;
use debias::data::{Matrix, MatrixMut};
use debias::{BiasCorrector, BiasDetector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

// Column-major dataset where every fourth column leaks the target.
fn create_data(n_samples: usize, n_features: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(1903);
    let target: Vec<f64> = (0..n_samples)
        .map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 })
        .collect();

    let mut data = Vec::with_capacity(n_samples * n_features);
    for j in 0..n_features {
        if j % 4 == 0 {
            data.extend(target.iter().map(|y| y + rng.gen_range(-0.3..0.3)));
        } else {
            for _ in 0..n_samples {
                data.push(rng.gen_range(0.0..1.0));
            }
        }
    }
    (data, target)
}

pub fn detection_benchmarks(c: &mut Criterion) {
    let n_samples = 10_000usize;
    let n_features = 20usize;

    let (data_vec, target) = create_data(n_samples, n_features);
    let matrix = Matrix::new(&data_vec, n_samples, n_features);
    let detector = BiasDetector::default();

    let mut group = c.benchmark_group("detect");
    group.warm_up_time(Duration::from_secs(5));
    group.bench_function("detect_serial", |b| {
        b.iter(|| detector.detect(black_box(&matrix), black_box(&target), false).unwrap())
    });
    group.bench_function("detect_parallel", |b| {
        b.iter(|| detector.detect(black_box(&matrix), black_box(&target), true).unwrap())
    });
    group.bench_function("feature_statistics", |b| {
        b.iter(|| {
            detector
                .feature_statistics(black_box(&matrix), black_box(&target), false)
                .unwrap()
        })
    });
    group.finish();
}

pub fn correction_benchmarks(c: &mut Criterion) {
    let n_samples = 10_000usize;
    let n_features = 20usize;

    let (data_vec, target) = create_data(n_samples, n_features);
    let report = {
        let matrix = Matrix::new(&data_vec, n_samples, n_features);
        BiasDetector::default().detect(&matrix, &target, true).unwrap()
    };
    let corrector = BiasCorrector::default();

    let mut group = c.benchmark_group("correct");
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(10);

    group.bench_function("correct_mean_shift", |b| {
        b.iter(|| {
            let mut scratch = data_vec.clone();
            let mut matrix = MatrixMut::new(&mut scratch, n_samples, n_features);
            corrector
                .correct(
                    &mut matrix,
                    black_box(&target),
                    black_box(&report),
                    CorrectionMethod::MeanShift,
                )
                .unwrap()
        })
    });
    group.bench_function("correct_adversarial", |b| {
        b.iter(|| {
            let mut scratch = data_vec.clone();
            let mut matrix = MatrixMut::new(&mut scratch, n_samples, n_features);
            corrector
                .correct(
                    &mut matrix,
                    black_box(&target),
                    black_box(&report),
                    CorrectionMethod::Adversarial,
                )
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, detection_benchmarks, correction_benchmarks);
criterion_main!(benches);
