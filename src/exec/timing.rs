//! Timing-line parsing
//!
//! Benchmarked programs report wall-clock time as the first line of
//! their combined output, in the form `<prefix><minutes>m<seconds>s`
//! where the prefix occupies a fixed 5-character field (the layout of
//! `time`'s `real\t0m1.234s`). Parsing is a pure function of the
//! captured text.

use std::time::Duration;

use crate::{MmBenchError, Result};

/// Width of the label field preceding the minutes value
const PREFIX_WIDTH: usize = 5;

/// Parse the timing line from captured output into a duration
///
/// Only the first line of `output` is examined. The fixed prefix is
/// skipped, minutes and seconds are combined into a total duration.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use mmbench::exec::parse_timing_line;
///
/// let parsed = parse_timing_line("real\t1m2.000s").unwrap();
/// assert_eq!(parsed, Duration::from_secs(62));
/// ```
pub fn parse_timing_line(output: &str) -> Result<Duration> {
    let line = output
        .lines()
        .next()
        .ok_or_else(|| MmBenchError::ParseError("Captured output is empty".to_string()))?;

    let rest = line.get(PREFIX_WIDTH..).ok_or_else(|| {
        MmBenchError::ParseError(format!("Timing line shorter than prefix: {:?}", line))
    })?;

    let (minutes_part, seconds_part) = rest.split_once('m').ok_or_else(|| {
        MmBenchError::ParseError(format!("No minutes separator in timing line: {:?}", line))
    })?;

    let seconds_part = seconds_part.strip_suffix('s').ok_or_else(|| {
        MmBenchError::ParseError(format!("No seconds suffix in timing line: {:?}", line))
    })?;

    let minutes: u64 = minutes_part.trim().parse().map_err(|_| {
        MmBenchError::ParseError(format!("Invalid minutes {:?} in timing line: {:?}", minutes_part, line))
    })?;

    let seconds: f64 = seconds_part.trim().parse().map_err(|_| {
        MmBenchError::ParseError(format!("Invalid seconds {:?} in timing line: {:?}", seconds_part, line))
    })?;

    // try_from rejects negative, non-finite, and overlong values
    Duration::try_from_secs_f64(minutes as f64 * 60.0 + seconds).map_err(|_| {
        MmBenchError::ParseError(format!("Duration out of range in timing line: {:?}", line))
    })
}
