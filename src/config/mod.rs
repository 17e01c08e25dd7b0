//! Configuration management module
//!
//! Handles loading, saving, and validation of the benchmark runner
//! configuration.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{MmBenchError, Result, APP_NAME, CONFIG_FILE};

pub mod persistence;

/// Runner configuration covering the programs under comparison and the
/// sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Ordered list of executable paths to benchmark
    pub programs: Vec<PathBuf>,
    /// Ordered list of size indices; each program is invoked with the
    /// index itself, while reports show the derived problem size `2^n`
    pub sizes: Vec<u32>,
    /// Number of timed runs per (program, size) pair
    pub repetitions: usize,
    /// Per-invocation wall-clock limit; `None` waits indefinitely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            programs: vec![PathBuf::from("./naive"), PathBuf::from("./strassen")],
            sizes: (1..=12).collect(),
            repetitions: 5,
            timeout: None,
        }
    }
}

impl RunnerConfig {
    /// Create a new runner configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.programs.is_empty() {
            return Err(MmBenchError::ConfigError(
                "At least one program must be configured".to_string(),
            ));
        }

        if self.sizes.is_empty() {
            return Err(MmBenchError::ConfigError(
                "At least one size index must be configured".to_string(),
            ));
        }

        // Problem sizes are reported as 2^n in a u64
        const MAX_SIZE_INDEX: u32 = 63;
        if let Some(&n) = self.sizes.iter().find(|&&n| n > MAX_SIZE_INDEX) {
            return Err(MmBenchError::ConfigError(format!(
                "Size index too large: {} (max: {})",
                n, MAX_SIZE_INDEX
            )));
        }

        if self.repetitions == 0 {
            return Err(MmBenchError::ConfigError(
                "Repetitions must be greater than 0".to_string(),
            ));
        }

        const MAX_REPETITIONS: usize = 100;
        if self.repetitions > MAX_REPETITIONS {
            return Err(MmBenchError::ConfigError(format!(
                "Too many repetitions: {} (max: {})",
                self.repetitions, MAX_REPETITIONS
            )));
        }

        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(MmBenchError::ConfigError(
                    "Timeout must be greater than 0".to_string(),
                ));
            }

            const MAX_TIMEOUT: Duration = Duration::from_secs(3600); // 1 hour
            if timeout > MAX_TIMEOUT {
                return Err(MmBenchError::ConfigError(format!(
                    "Timeout too long: {} (max: {})",
                    humantime::format_duration(timeout),
                    humantime::format_duration(MAX_TIMEOUT)
                )));
            }
        }

        Ok(())
    }

    /// Set the programs to benchmark
    pub fn with_programs(mut self, programs: Vec<PathBuf>) -> Self {
        self.programs = programs;
        self
    }

    /// Set the size indices to benchmark
    pub fn with_sizes(mut self, sizes: Vec<u32>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Set the number of timed runs per (program, size) pair
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the per-invocation timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Column labels for the comparison table, derived from the file
    /// stem of each program path
    pub fn labels(&self) -> Vec<String> {
        self.programs
            .iter()
            .map(|p| {
                p.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.to_string_lossy().into_owned())
            })
            .collect()
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            MmBenchError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            MmBenchError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MmBenchError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MmBenchError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;

        fs::write(&config_path, content).map_err(|e| {
            MmBenchError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/mmbench/mmbench.toml or the platform equivalent
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            MmBenchError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.programs.len(), 2);
        assert_eq!(config.sizes, (1..=12).collect::<Vec<_>>());
        assert_eq!(config.repetitions, 5);
        assert!(config.timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_labels_from_program_paths() {
        let config = RunnerConfig::default();
        assert_eq!(config.labels(), vec!["naive", "strassen"]);

        let config = config.with_programs(vec![
            PathBuf::from("/opt/bench/blocked"),
            PathBuf::from("./tiled.exe"),
        ]);
        assert_eq!(config.labels(), vec!["blocked", "tiled"]);
    }

    #[test]
    fn test_validation_rejects_empty_lists() {
        let config = RunnerConfig::default().with_programs(Vec::new());
        assert!(config.validate().is_err());

        let config = RunnerConfig::default().with_sizes(Vec::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_repetitions() {
        let config = RunnerConfig::default().with_repetitions(0);
        assert!(config.validate().is_err());

        let config = RunnerConfig::default().with_repetitions(101);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_timeout() {
        let config = RunnerConfig::default().with_timeout(Some(Duration::ZERO));
        assert!(config.validate().is_err());

        let config = RunnerConfig::default().with_timeout(Some(Duration::from_secs(7200)));
        assert!(config.validate().is_err());

        let config = RunnerConfig::default().with_timeout(Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_oversized_index() {
        let config = RunnerConfig::default().with_sizes(vec![1, 64]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = RunnerConfig::default().with_timeout(Some(Duration::from_secs(30)));
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        let deserialized: RunnerConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize from TOML");

        assert_eq!(config.programs, deserialized.programs);
        assert_eq!(config.sizes, deserialized.sizes);
        assert_eq!(config.repetitions, deserialized.repetitions);
        assert_eq!(config.timeout, deserialized.timeout);
    }

    #[test]
    fn test_config_file_path() {
        let path = RunnerConfig::config_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("mmbench"));
        assert!(path.to_string_lossy().contains("mmbench.toml"));
    }
}
