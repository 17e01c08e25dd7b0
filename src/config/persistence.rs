//! Report persistence module
//!
//! Handles saving, loading, and rotation of comparison reports.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::ComparisonReport;
use crate::{MmBenchError, Result, APP_NAME, MAX_RESULTS_HISTORY, RESULTS_FILE};

/// Report storage manager
#[derive(Debug)]
pub struct ReportStorage {
    results_path: PathBuf,
}

/// Results file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct ResultsFile {
    version: u32,
    reports: Vec<ComparisonReport>,
}

impl Default for ResultsFile {
    fn default() -> Self {
        Self {
            version: 1,
            reports: Vec::new(),
        }
    }
}

impl ReportStorage {
    /// Create a new report storage manager
    pub fn new() -> Result<Self> {
        let results_path = Self::results_file_path()?;
        Ok(Self { results_path })
    }

    /// Create a storage manager rooted at a specific file path
    pub fn with_path(results_path: PathBuf) -> Self {
        Self { results_path }
    }

    /// Get the standard results file path
    /// Uses $DATA_HOME/mmbench/results.json or the platform equivalent
    pub fn results_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            MmBenchError::PersistenceError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(RESULTS_FILE))
    }

    /// Load all reports from the results file
    pub fn load_reports(&self) -> Result<Vec<ComparisonReport>> {
        if !self.results_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.results_path).map_err(|e| {
            MmBenchError::PersistenceError(format!(
                "Failed to read results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        let results_file: ResultsFile = serde_json::from_str(&content).map_err(|e| {
            MmBenchError::PersistenceError(format!(
                "Failed to parse results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        Ok(results_file.reports)
    }

    /// Append a new report to the results file
    /// Automatically rotates old reports if the file exceeds MAX_RESULTS_HISTORY entries
    pub fn append_report(&self, report: ComparisonReport) -> Result<()> {
        let mut reports = self.load_reports()?;

        reports.push(report);

        if reports.len() > MAX_RESULTS_HISTORY {
            let skip_count = reports.len() - MAX_RESULTS_HISTORY;
            reports = reports.into_iter().skip(skip_count).collect();
        }

        self.save_reports(reports)
    }

    /// Save all reports to the results file
    fn save_reports(&self, reports: Vec<ComparisonReport>) -> Result<()> {
        if let Some(parent) = self.results_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MmBenchError::PersistenceError(format!(
                    "Failed to create results directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let results_file = ResultsFile {
            version: 1,
            reports,
        };

        let content = serde_json::to_string_pretty(&results_file).map_err(|e| {
            MmBenchError::PersistenceError(format!("Failed to serialize reports: {}", e))
        })?;

        fs::write(&self.results_path, content).map_err(|e| {
            MmBenchError::PersistenceError(format!(
                "Failed to write results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the number of stored reports
    pub fn count_reports(&self) -> Result<usize> {
        let reports = self.load_reports()?;
        Ok(reports.len())
    }

    /// Clear all stored reports
    pub fn clear_reports(&self) -> Result<()> {
        if self.results_path.exists() {
            fs::remove_file(&self.results_path).map_err(|e| {
                MmBenchError::PersistenceError(format!(
                    "Failed to remove results file {}: {}",
                    self.results_path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
