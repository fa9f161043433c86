//! Benchmarks for the skeleton simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use ambler::{BodyConfig, NoOpStepObserver, Skeleton, StepConfig};

fn bench_walking(c: &mut Criterion) {
    c.bench_function("skeleton_walking_120_steps", |b| {
        b.iter(|| {
            let cfg = StepConfig::default();
            let mut s: Skeleton<f32> =
                Skeleton::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();
            s.start_walking();
            for _ in 0..120 {
                s.step(1.0 / 60.0, &cfg, &mut NoOpStepObserver);
            }
            s.segments()
        });
    });
}

fn bench_standing(c: &mut Criterion) {
    c.bench_function("skeleton_standing_300_steps", |b| {
        b.iter(|| {
            let cfg = StepConfig::default();
            let mut s: Skeleton<f32> =
                Skeleton::new(600.0, 400.0, 1.0, &BodyConfig::default()).unwrap();
            for _ in 0..300 {
                s.step(1.0 / 60.0, &cfg, &mut NoOpStepObserver);
            }
            s.segments()
        });
    });
}

criterion_group!(benches, bench_walking, bench_standing);
criterion_main!(benches);
