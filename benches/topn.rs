mod common;

use std::hint::black_box;

use common::workload::{Workload, WorkloadSpec};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use topnkit::TopNCounter;

const STREAM_LEN: usize = 64 * 1024;
const UNIVERSE: u64 = 100_000;

fn stream(workload: Workload) -> Vec<u64> {
    WorkloadSpec {
        universe: UNIVERSE,
        workload,
        seed: 42,
    }
    .keys(STREAM_LEN)
}

fn bench_offer(c: &mut Criterion) {
    let mut group = c.benchmark_group("topn_offer");
    group.throughput(Throughput::Elements(STREAM_LEN as u64));

    for (name, workload) in [
        ("uniform", Workload::Uniform),
        ("zipfian_1.0", Workload::Zipfian { exponent: 1.0 }),
        ("zipfian_1.2", Workload::Zipfian { exponent: 1.2 }),
    ] {
        let keys = stream(workload);
        for capacity in [100usize, 1_000, 10_000] {
            group.bench_function(format!("{}/cap_{}", name, capacity), |b| {
                b.iter_batched(
                    || TopNCounter::new(capacity),
                    |mut counter| {
                        for &key in &keys {
                            black_box(counter.offer(black_box(key)));
                        }
                        counter
                    },
                    BatchSize::LargeInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_offer_weighted(c: &mut Criterion) {
    let mut group = c.benchmark_group("topn_offer_weighted");
    group.throughput(Throughput::Elements(STREAM_LEN as u64));
    let keys = stream(Workload::Zipfian { exponent: 1.0 });
    group.bench_function("zipfian_1.0/cap_1000", |b| {
        b.iter_batched(
            || TopNCounter::new(1_000),
            |mut counter| {
                for (i, &key) in keys.iter().enumerate() {
                    let weight = (i % 7) as f64 + 0.5;
                    black_box(counter.offer_weighted(black_box(key), weight));
                }
                counter
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn filled(capacity: usize, seed: u64) -> TopNCounter<u64> {
    let keys = WorkloadSpec {
        universe: UNIVERSE,
        workload: Workload::Zipfian { exponent: 1.0 },
        seed,
    }
    .keys(STREAM_LEN);
    let mut counter = TopNCounter::new(capacity);
    for key in keys {
        counter.offer(key);
    }
    counter
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("topn_queries");
    let counter = filled(5_000, 7);
    for k in [10usize, 100, 1_000] {
        group.bench_function(format!("peek_{}", k), |b| {
            b.iter(|| black_box(counter.peek(black_box(k))))
        });
    }
    group.bench_function("to_external", |b| b.iter(|| black_box(counter.to_external())));
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("topn_merge");
    for capacity in [500usize, 5_000] {
        let left = filled(capacity, 1);
        let right = filled(capacity, 2);
        group.throughput(Throughput::Elements(capacity as u64));
        group.bench_function(format!("cap_{}", capacity), |b| {
            b.iter_batched(
                || (left.clone(), right.clone()),
                |(mut left, right)| {
                    left.merge(right);
                    left
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_import_retain(c: &mut Criterion) {
    let mut group = c.benchmark_group("topn_external");
    let (counts, items) = filled(5_000, 3).to_external();
    group.throughput(Throughput::Elements(counts.len() as u64));
    group.bench_function("from_external", |b| {
        b.iter_batched(
            || (TopNCounter::new(5_000), items.clone()),
            |(mut counter, items)| {
                counter.from_external(counts.len(), &counts, items);
                counter
            },
            BatchSize::LargeInput,
        )
    });
    group.bench_function("retain_half", |b| {
        b.iter_batched(
            || filled(5_000, 4),
            |mut counter| {
                counter.retain(2_500);
                counter
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_offer,
    bench_offer_weighted,
    bench_queries,
    bench_merge,
    bench_import_retain
);
criterion_main!(benches);
