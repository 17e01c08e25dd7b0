//! Utility functions module
//!
//! Contains the duration formatting helper used by the comparison
//! table and log output.

pub mod units;

// Re-export commonly used functions
pub use units::format_seconds;
