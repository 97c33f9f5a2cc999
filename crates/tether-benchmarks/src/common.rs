//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

use tether_core::types::{DependencySpec, InstalledPackage};
use tether_registry::{InstalledRegistry, MemoryManifests};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Installed graph where package `i` depends on the next `fanout` packages.
///
/// Every fifth edge carries a constraint the target violates, and the last
/// package depends on one that is not installed.
pub fn layered_graph(size: usize, fanout: usize) -> (InstalledRegistry, MemoryManifests) {
    let installed: InstalledRegistry = (0..size)
        .map(|i| {
            InstalledPackage::new(
                format!("plugin-{}", i),
                "bench",
                format!("1.{}.0", i % 10),
                format!("/plugins/plugin-{}", i),
            )
        })
        .collect();

    let mut manifests = MemoryManifests::new();
    for i in 0..size {
        let targets: Vec<(String, DependencySpec)> = (1..=fanout)
            .map(|step| i + step)
            .map(|j| {
                let spec = if j % 5 == 0 {
                    DependencySpec::from_origin("bench").with_constraint(">=2.0.0")
                } else {
                    DependencySpec::from_origin("bench").with_constraint("^1.0.0")
                };
                let name = if j < size {
                    format!("plugin-{}", j)
                } else {
                    format!("external-{}", j)
                };
                (name, spec)
            })
            .collect();
        manifests = manifests.with(
            &format!("plugin-{}", i),
            targets.iter().map(|(name, spec)| (name.as_str(), spec.clone())),
        );
    }

    (installed, manifests)
}

/// Single ring `plugin-0 -> plugin-1 -> ... -> plugin-0`
pub fn ring_graph(size: usize) -> (InstalledRegistry, MemoryManifests) {
    let installed: InstalledRegistry = (0..size)
        .map(|i| InstalledPackage::new(format!("plugin-{}", i), "bench", "1.0.0", "/plugins"))
        .collect();

    let mut manifests = MemoryManifests::new();
    for i in 0..size {
        let next = format!("plugin-{}", (i + 1) % size);
        manifests = manifests.with(
            &format!("plugin-{}", i),
            [(next.as_str(), DependencySpec::from_origin("bench"))],
        );
    }

    (installed, manifests)
}
