//! tether benchmarking suite
//!
//! Benchmarks for version parsing, constraint matching and graph
//! resolution over synthetic plugin graphs.

pub mod common;

pub use common::*;
