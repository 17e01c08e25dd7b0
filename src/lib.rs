//! MMBENCH - Matrix Multiplication Benchmark Driver
//!
//! Drives repeated timed executions of external matrix-multiplication
//! binaries and reports averaged wall-clock durations as a CSV
//! comparison table.

use std::fmt;

// Public re-exports
pub mod bench;
pub mod config;
pub mod exec;
pub mod models;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum MmBenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Child process could not be spawned
    SpawnError(String),
    /// Timing line could not be parsed from captured output
    ParseError(String),
    /// Results persistence error
    PersistenceError(String),
    /// CSV emission error
    CsvError(String),
}

impl fmt::Display for MmBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MmBenchError::IoError(err) => write!(f, "I/O error: {}", err),
            MmBenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MmBenchError::SpawnError(msg) => write!(f, "Spawn error: {}", msg),
            MmBenchError::ParseError(msg) => write!(f, "Timing parse error: {}", msg),
            MmBenchError::PersistenceError(msg) => write!(f, "Results persistence error: {}", msg),
            MmBenchError::CsvError(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for MmBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MmBenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MmBenchError {
    fn from(err: std::io::Error) -> Self {
        MmBenchError::IoError(err)
    }
}

impl From<serde_json::Error> for MmBenchError {
    fn from(err: serde_json::Error) -> Self {
        MmBenchError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for MmBenchError {
    fn from(err: toml::de::Error) -> Self {
        MmBenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for MmBenchError {
    fn from(err: toml::ser::Error) -> Self {
        MmBenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

impl From<csv::Error> for MmBenchError {
    fn from(err: csv::Error) -> Self {
        MmBenchError::CsvError(err.to_string())
    }
}

/// Result type alias for MMBENCH operations
pub type Result<T> = std::result::Result<T, MmBenchError>;

// Common types and constants
pub const APP_NAME: &str = "mmbench";
pub const CONFIG_FILE: &str = "mmbench.toml";
pub const RESULTS_FILE: &str = "results.json";
pub const MAX_RESULTS_HISTORY: usize = 100;

/// Sentinel printed in place of an average when an invocation failed
pub const UNAVAILABLE_SENTINEL: &str = "N/A";
