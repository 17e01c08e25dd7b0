//! Comparison report data models
//!
//! Contains structures for storing and serializing averaged timing
//! results, plus CSV emission for the comparison table.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RunnerConfig;
use crate::util::units::format_seconds;
use crate::{Result, UNAVAILABLE_SENTINEL};

/// One averaged timing for a (program, size) pair, or the unavailable
/// sentinel when an invocation for that pair failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Averaged duration over the configured repetitions
    Available(#[serde(with = "duration_serde")] Duration),
    /// At least one invocation failed; the table stays rectangular
    Unavailable,
}

impl Cell {
    /// Render the cell as it appears in the CSV table: the averaged
    /// duration in seconds with three decimal places, or `N/A`
    pub fn render(&self) -> String {
        match self {
            Cell::Available(avg) => format_seconds(*avg),
            Cell::Unavailable => UNAVAILABLE_SENTINEL.to_string(),
        }
    }

    /// Check whether this cell holds a usable timing
    pub fn is_available(&self) -> bool {
        matches!(self, Cell::Available(_))
    }
}

/// One row of the comparison table: a problem size plus one cell per
/// configured program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    /// Size index `n` the programs were invoked with
    pub size_index: u32,
    /// Derived problem size `2^n` shown in the first column
    pub problem_size: u64,
    /// Averaged timings, in configured program order
    pub cells: Vec<Cell>,
}

impl ResultRow {
    /// Create a row for a size index, deriving the reported problem size
    pub fn new(size_index: u32, cells: Vec<Cell>) -> Self {
        Self {
            size_index,
            problem_size: 1u64 << size_index,
            cells,
        }
    }
}

/// Complete comparison report: configuration snapshot plus one row per
/// configured size index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Timestamp when the benchmark run completed
    pub timestamp: DateTime<Utc>,
    /// Configuration used for this run
    pub config: RunnerConfig,
    /// Result rows in configured size order
    pub rows: Vec<ResultRow>,
}

impl ComparisonReport {
    /// Create a new report stamped with the current time
    pub fn new(config: RunnerConfig, rows: Vec<ResultRow>) -> Self {
        Self {
            timestamp: Utc::now(),
            config,
            rows,
        }
    }

    /// Write the comparison table as CSV: one header row with the size
    /// column and the program labels, then one row per size index
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec!["N".to_string()];
        header.extend(self.config.labels());
        csv_writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.problem_size.to_string()];
            record.extend(row.cells.iter().map(Cell::render));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render the comparison table as a CSV string
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| crate::MmBenchError::CsvError(format!("Invalid UTF-8 in CSV: {}", e)))
    }

    /// Get a human-readable summary of the report
    pub fn summary(&self) -> String {
        let available = self
            .rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.is_available())
            .count();
        let total = self.rows.iter().map(|r| r.cells.len()).sum::<usize>();
        format!(
            "{} - {} sizes x {} programs - {}/{} timings available",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.rows.len(),
            self.config.programs.len(),
            available,
            total
        )
    }
}

// Custom serde module for Duration serialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RunnerConfig {
        RunnerConfig::default().with_sizes(vec![1, 2, 3])
    }

    fn test_report() -> ComparisonReport {
        let rows = vec![
            ResultRow::new(
                1,
                vec![
                    Cell::Available(Duration::from_secs_f64(0.124)),
                    Cell::Available(Duration::from_secs_f64(0.2)),
                ],
            ),
            ResultRow::new(
                2,
                vec![
                    Cell::Available(Duration::from_secs_f64(1.5)),
                    Cell::Available(Duration::from_secs_f64(1.25)),
                ],
            ),
            ResultRow::new(
                3,
                vec![Cell::Available(Duration::from_secs_f64(31.0)), Cell::Unavailable],
            ),
        ];
        ComparisonReport::new(test_config(), rows)
    }

    #[test]
    fn test_cell_render() {
        assert_eq!(Cell::Available(Duration::from_secs_f64(31.0)).render(), "31.000");
        assert_eq!(Cell::Available(Duration::from_secs_f64(0.124)).render(), "0.124");
        assert_eq!(Cell::Unavailable.render(), "N/A");
    }

    #[test]
    fn test_row_derives_problem_size() {
        let row = ResultRow::new(10, Vec::new());
        assert_eq!(row.problem_size, 1024);
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = test_report().to_csv_string().expect("csv");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "N,naive,strassen");
        assert_eq!(lines[1], "2,0.124,0.200");
        assert_eq!(lines[2], "4,1.500,1.250");
        assert_eq!(lines[3], "8,31.000,N/A");
    }

    #[test]
    fn test_csv_header_appears_once() {
        let csv = test_report().to_csv_string().expect("csv");
        assert_eq!(csv.lines().filter(|l| l.starts_with("N,")).count(), 1);
        assert!(csv.starts_with("N,naive,strassen"));
    }

    #[test]
    fn test_failed_cell_keeps_row_rectangular() {
        let csv = test_report().to_csv_string().expect("csv");
        let last = csv.lines().last().expect("rows");
        assert_eq!(last.split(',').count(), 3);
        assert_eq!(last.split(',').nth(2), Some("N/A"));
    }

    #[test]
    fn test_summary_counts_availability() {
        let summary = test_report().summary();
        assert!(summary.contains("3 sizes x 2 programs"));
        assert!(summary.contains("5/6 timings available"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let report = test_report();
        let json = serde_json::to_string(&report).expect("serialize");
        let deserialized: ComparisonReport = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(report.rows.len(), deserialized.rows.len());
        assert_eq!(report.rows[2].cells, deserialized.rows[2].cells);
        assert_eq!(report.timestamp, deserialized.timestamp);
    }
}
