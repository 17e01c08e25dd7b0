//! Child process invocation
//!
//! Runs a benchmarked program with an explicit argument list (never
//! through a shell), captures its combined stdout/stderr and exit
//! status, and enforces an optional wall-clock timeout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use crate::{MmBenchError, Result};

/// Outcome of a single child invocation
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The child ran to completion
    Exited {
        /// Combined stdout followed by stderr, trimmed
        output: String,
        /// Exit code if the child exited normally
        code: Option<i32>,
        /// Whether the exit status was zero
        success: bool,
    },
    /// The configured timeout expired; the child was killed
    TimedOut,
}

/// Invoker for benchmarked programs with an optional per-run timeout
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    timeout: Option<Duration>,
}

impl ProcessInvoker {
    /// Create a new invoker; `timeout` of `None` waits indefinitely
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Run a program with the given arguments and capture its output
    ///
    /// The child is awaited to completion before returning; invocations
    /// are strictly sequential from the caller's perspective. A spawn
    /// failure (e.g. missing executable) is an error; a non-zero exit
    /// or an expired timeout is reported through [`RunOutcome`].
    pub async fn run(&self, program: &Path, args: &[String]) -> Result<RunOutcome> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out child is killed when its future is dropped
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| {
            MmBenchError::SpawnError(format!(
                "Failed to spawn {}: {}",
                command_line(program, args),
                e
            ))
        })?;

        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result?,
                Err(_) => return Ok(RunOutcome::TimedOut),
            },
            None => wait.await?,
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(RunOutcome::Exited {
            output: combined.trim().to_string(),
            code: output.status.code(),
            success: output.status.success(),
        })
    }
}

/// Render a program path plus arguments as a single command line for
/// error reporting
pub fn command_line(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_command_line_rendering() {
        let program = PathBuf::from("./naive");
        assert_eq!(command_line(&program, &[]), "./naive");
        assert_eq!(command_line(&program, &["3".to_string()]), "./naive 3");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_an_error() {
        let invoker = ProcessInvoker::new(None);
        let missing = PathBuf::from("./definitely-not-a-real-program");
        let err = invoker
            .run(&missing, &["1".to_string()])
            .await
            .expect_err("missing executable should fail to spawn");
        assert!(matches!(err, MmBenchError::SpawnError(_)));
        assert!(err.to_string().contains("definitely-not-a-real-program 1"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_output_and_status() {
        let invoker = ProcessInvoker::new(None);
        let outcome = invoker
            .run(Path::new("/bin/sh"), &["-c".to_string(), "echo hello".to_string()])
            .await
            .expect("run");

        match outcome {
            RunOutcome::Exited {
                output,
                code,
                success,
            } => {
                assert_eq!(output, "hello");
                assert_eq!(code, Some(0));
                assert!(success);
            }
            RunOutcome::TimedOut => panic!("unexpected timeout"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_not_success() {
        let invoker = ProcessInvoker::new(None);
        let outcome = invoker
            .run(
                Path::new("/bin/sh"),
                &["-c".to_string(), "echo boom; exit 3".to_string()],
            )
            .await
            .expect("run");

        match outcome {
            RunOutcome::Exited {
                output,
                code,
                success,
            } => {
                assert_eq!(output, "boom");
                assert_eq!(code, Some(3));
                assert!(!success);
            }
            RunOutcome::TimedOut => panic!("unexpected timeout"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_hung_child() {
        let invoker = ProcessInvoker::new(Some(Duration::from_millis(100)));
        let outcome = invoker
            .run(Path::new("/bin/sh"), &["-c".to_string(), "sleep 30".to_string()])
            .await
            .expect("run");

        assert_eq!(outcome, RunOutcome::TimedOut);
    }
}
