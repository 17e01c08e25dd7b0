//! Units formatting utilities
//!
//! Provides the duration rendering used by the comparison table.

use std::time::Duration;

/// Format a duration as seconds with exactly three decimal places,
/// the cell format of the comparison table
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use mmbench::util::units::format_seconds;
///
/// assert_eq!(format_seconds(Duration::from_secs(31)), "31.000");
/// assert_eq!(format_seconds(Duration::from_millis(1500)), "1.500");
/// ```
pub fn format_seconds(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::ZERO), "0.000");
        assert_eq!(format_seconds(Duration::from_millis(250)), "0.250");
        assert_eq!(format_seconds(Duration::from_secs(31)), "31.000");
        assert_eq!(format_seconds(Duration::from_secs_f64(62.0)), "62.000");
    }
}
