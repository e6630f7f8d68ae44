//! Scenario benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deltablue_scenarios::{chain_test, projection_test};

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    for n in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| chain_test(black_box(n)))
        });
    }
    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    for n in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| projection_test(black_box(n)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain, bench_projection);
criterion_main!(benches);
