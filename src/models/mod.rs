//! Data models module
//!
//! Contains the comparison table data model: per-cell averaged timings,
//! result rows, and the full report with CSV emission.

pub mod result;

// Re-export commonly used types
pub use result::{Cell, ComparisonReport, ResultRow};
