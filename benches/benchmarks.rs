use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scalar_kalman::{
    config::{Config, SignalConfig},
    filter_bank::FilterBank,
    signal,
    simulator as sim,
    state_estimator::{
        scalar::{ScalarKalman, ScalarParams},
        StateEstimator,
    },
};

fn criterion_benchmark(c: &mut Criterion) {
    let signal_config = SignalConfig {
        num_steps: 10_000,
        seed: Some(42),
        ..SignalConfig::default()
    };
    let observations = signal::generate(&signal_config).unwrap();
    let init = ScalarParams::new(0.2294, 0.0, 1.0, 1.0, 1e-4, 0.0025);
    let z: Vec<f64> = observations.z.iter().copied().collect();

    c.bench_function("advance", |b| {
        let kf = ScalarKalman;
        let mut eststate = init;
        let mut zs = z.iter().cycle();
        b.iter(|| kf.advance(black_box(*zs.next().unwrap()), &mut eststate))
    });

    c.bench_with_input(
        BenchmarkId::new("run_scalar", observations.len()),
        &observations,
        |b, observations| {
            let config = Config::default();
            b.iter(|| sim::run_scalar(&config, observations).unwrap())
        },
    );

    let streams: Vec<Vec<f64>> = (0..8).map(|_| z.clone()).collect();
    c.bench_with_input(BenchmarkId::new("filter_bank", streams.len()), &streams, |b, streams| {
        b.iter(|| {
            let mut bank = FilterBank::init(vec![init; streams.len()]);
            bank.run(streams).unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
