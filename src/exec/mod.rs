//! Process execution module
//!
//! Contains child process invocation with output capture and the
//! timing-line parser for captured output.

pub mod process;
pub mod timing;

// Re-export commonly used types
pub use process::{command_line, ProcessInvoker, RunOutcome};
pub use timing::parse_timing_line;
