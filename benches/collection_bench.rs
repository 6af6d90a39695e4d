//! Benchmark for the collection algorithms.
//!
//! Measures the cost of routing every algorithm through the traversal kernel
//! against the equivalent iterator chains.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lambdash::collection::{filter, intersection, reduce, shuffle, sort_by, uniq};
use std::hint::black_box;

// =============================================================================
// Kernel Benchmarks
// =============================================================================

fn benchmark_reduce(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("reduce");

    for size in [100, 1_000, 10_000] {
        let numbers: Vec<u64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("kernel", size), &numbers, |bencher, numbers| {
            bencher.iter(|| reduce(black_box(numbers), 0_u64, |sum, number| sum + number));
        });

        group.bench_with_input(BenchmarkId::new("iterator", size), &numbers, |bencher, numbers| {
            bencher.iter(|| black_box(numbers).iter().sum::<u64>());
        });
    }

    group.finish();
}

fn benchmark_filter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("filter");

    for size in [100, 1_000, 10_000] {
        let numbers: Vec<u64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("kernel", size), &numbers, |bencher, numbers| {
            bencher.iter(|| filter(black_box(numbers), |number| number % 3 == 0));
        });
    }

    group.finish();
}

// =============================================================================
// Derived Algorithm Benchmarks
// =============================================================================

fn benchmark_derived(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("derived");
    let numbers: Vec<u32> = (0..1_000).map(|number| number % 97).collect();
    let others = vec![(0..500).collect::<Vec<u32>>(), (250..750).collect()];

    group.bench_function("uniq", |bencher| {
        bencher.iter(|| uniq(black_box(&numbers)));
    });

    group.bench_function("sort_by", |bencher| {
        bencher.iter(|| sort_by(black_box(&numbers), |number| *number));
    });

    group.bench_function("intersection", |bencher| {
        bencher.iter(|| intersection(black_box(others.as_slice())));
    });

    group.bench_function("shuffle", |bencher| {
        bencher.iter(|| shuffle(black_box(&numbers)));
    });

    group.finish();
}

criterion_group!(benches, benchmark_reduce, benchmark_filter, benchmark_derived);
criterion_main!(benches);
