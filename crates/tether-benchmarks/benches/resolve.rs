//! Dependency resolution performance benchmarks
//!
//! Walks synthetic plugin graphs of increasing size, with and without
//! cycles, and measures walk-order computation on the resulting reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tether_benchmarks::{criterion_config, layered_graph, ring_graph};
use tether_registry::KnownOrigins;
use tether_resolver::{resolve, DependencyGraph};

/// Benchmark resolution of layered graphs with mismatches and missing edges
fn bench_layered_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered_resolution");
    group.sample_size(20);

    let origins = KnownOrigins::new();
    for size in [10usize, 100, 1000].iter() {
        let (installed, manifests) = layered_graph(*size, 4);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("plugins", size), size, |b, _| {
            b.iter(|| black_box(resolve(&installed, &origins, &manifests)));
        });
    }

    group.finish();
}

/// Benchmark cycle detection on a single large ring
fn bench_ring_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_resolution");

    let origins = KnownOrigins::new();
    for size in [100usize, 1000, 10_000].iter() {
        let (installed, manifests) = ring_graph(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("plugins", size), size, |b, _| {
            b.iter(|| black_box(resolve(&installed, &origins, &manifests)));
        });
    }

    group.finish();
}

/// Benchmark graph construction and topological walk order
fn bench_walk_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk_order");

    for size in [100usize, 1000].iter() {
        let (installed, manifests) = layered_graph(*size, 4);
        let report = resolve(&installed, &KnownOrigins::new(), &manifests);

        group.bench_with_input(BenchmarkId::new("plugins", size), &report, |b, report| {
            b.iter(|| black_box(DependencyGraph::from_report(report).walk_order()));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_layered_resolution, bench_ring_resolution, bench_walk_order
}
criterion_main!(benches);
