//! Version, constraint and manifest parsing benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tether_benchmarks::criterion_config;
use tether_core::types::{Constraint, Version};
use tether_registry::Manifest;
use tether_resolver::satisfies;

const VERSIONS: &[&str] = &[
    "1.0.0",
    "v2.13.7",
    "1.0.0-alpha.1",
    "1.0.0-rc.1+build.5",
    "10.20.30-beta.2.exp",
];

const CONSTRAINTS: &[&str] = &["^1.2.0", "~0.3.1", ">=1.0.0 <2.0.0", ">= 1.0.0, != 1.4.2, < 3", "*"];

/// Benchmark semver parsing
fn bench_version_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_parsing");
    group.throughput(Throughput::Elements(VERSIONS.len() as u64));

    group.bench_function("mixed", |b| {
        b.iter(|| {
            for input in VERSIONS {
                black_box(Version::parse(input).ok());
            }
        });
    });

    group.finish();
}

/// Benchmark constraint parsing and matching
fn bench_constraints(c: &mut Criterion) {
    let mut group = c.benchmark_group("constraints");

    for constraint in CONSTRAINTS {
        group.bench_with_input(BenchmarkId::new("parse", constraint), constraint, |b, c| {
            b.iter(|| black_box(Constraint::parse(c).ok()));
        });
        group.bench_with_input(BenchmarkId::new("satisfies", constraint), constraint, |b, c| {
            b.iter(|| black_box(satisfies("1.5.0", c).is_ok()));
        });
    }

    group.finish();
}

fn manifest_json(dependencies: usize) -> String {
    let entries: Vec<String> = (0..dependencies)
        .map(|i| {
            if i % 2 == 0 {
                format!(r#""dep-{}": "origin-{}""#, i, i % 7)
            } else {
                format!(
                    r#""dep-{}": {{"marketplace": "origin-{}", "source": "acme/repo-{}", "version": "^1.{}.0"}}"#,
                    i,
                    i % 7,
                    i,
                    i % 10
                )
            }
        })
        .collect();
    format!(
        r#"{{"name": "bench", "version": "1.0.0", "dependencies": {{{}}}}}"#,
        entries.join(", ")
    )
}

/// Benchmark manifest parsing with growing dependency maps
fn bench_manifest_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("manifest_parsing");

    for count in [10usize, 100, 500].iter() {
        let content = manifest_json(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("dependencies", count), &content, |b, content| {
            b.iter(|| black_box(Manifest::parse(content).ok()));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_version_parsing, bench_constraints, bench_manifest_parsing
}
criterion_main!(benches);
