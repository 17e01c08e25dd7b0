//! Benchmark engine module
//!
//! Contains the sequential benchmark loop driving repeated timed
//! executions of the configured programs.

pub mod runner;

// Re-export commonly used types
pub use runner::BenchmarkRunner;
