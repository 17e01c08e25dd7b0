//! Sequential benchmark runner
//!
//! Drives the comparison loop: for each configured size index and each
//! program, the program is invoked repeatedly with the index as its
//! sole argument, the timing line of each run is parsed, and the
//! accumulated duration becomes one cell of the comparison table.
//! Invocation failures are reported and masked with the unavailable
//! sentinel so the table stays rectangular.

use std::path::Path;
use std::time::Duration;

use log::{debug, error};

use crate::config::RunnerConfig;
use crate::exec::{command_line, parse_timing_line, ProcessInvoker, RunOutcome};
use crate::models::{Cell, ComparisonReport, ResultRow};
use crate::util::units::format_seconds;
use crate::Result;

/// Sequential benchmark runner
pub struct BenchmarkRunner {
    config: RunnerConfig,
    invoker: ProcessInvoker,
}

impl BenchmarkRunner {
    /// Create a new runner from a validated configuration
    pub fn new(config: RunnerConfig) -> Result<Self> {
        config.validate()?;

        let invoker = ProcessInvoker::new(config.timeout);

        Ok(Self { config, invoker })
    }

    /// Execute the full comparison: every size index against every
    /// program, one child process at a time
    pub async fn run(&self) -> Result<ComparisonReport> {
        let mut rows = Vec::with_capacity(self.config.sizes.len());

        for &size_index in &self.config.sizes {
            let mut cells = Vec::with_capacity(self.config.programs.len());
            for program in &self.config.programs {
                cells.push(self.time_program(program, size_index).await?);
            }
            rows.push(ResultRow::new(size_index, cells));
        }

        Ok(ComparisonReport::new(self.config.clone(), rows))
    }

    /// Time one (program, size) pair over the configured repetitions
    ///
    /// A non-zero exit or a timeout on any repetition yields the
    /// unavailable sentinel for the whole pair; remaining repetitions
    /// are skipped. Malformed timing output is a hard error.
    async fn time_program(&self, program: &Path, size_index: u32) -> Result<Cell> {
        let args = vec![size_index.to_string()];
        let mut accumulated = Duration::ZERO;

        for repetition in 0..self.config.repetitions {
            match self.invoker.run(program, &args).await? {
                RunOutcome::Exited {
                    output,
                    success: true,
                    ..
                } => {
                    let sample = parse_timing_line(&output)?;
                    debug!(
                        "{} n={} run {}/{}: {}s",
                        command_line(program, &args),
                        size_index,
                        repetition + 1,
                        self.config.repetitions,
                        format_seconds(sample)
                    );
                    accumulated += sample;
                }
                RunOutcome::Exited { output, code, .. } => {
                    error!(
                        "An error occurred while executing {} (exit code {}): {}",
                        command_line(program, &args),
                        describe_exit_code(code),
                        output
                    );
                    return Ok(Cell::Unavailable);
                }
                RunOutcome::TimedOut => {
                    error!(
                        "Timed out executing {} after {}",
                        command_line(program, &args),
                        self.config
                            .timeout
                            .map(|t| humantime::format_duration(t).to_string())
                            .unwrap_or_else(|| "(no timeout)".to_string())
                    );
                    return Ok(Cell::Unavailable);
                }
            }
        }

        // The divisor is twice the repetition count: the default five
        // runs report sum/10, matching the original comparison script.
        let average = accumulated / (2 * self.config.repetitions as u32);
        Ok(Cell::Available(average))
    }
}

/// Render an exit code for error reporting; a child killed by a signal
/// has no code
fn describe_exit_code(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown".to_string(),
    }
}
