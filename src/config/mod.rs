//! Configuration for report ingestion and cohort queries.
//!
//! All settings are plain values with clinical defaults. They can be loaded
//! from a JSON file; missing keys fall back to the defaults.

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CohortError, Result};
use crate::error::util::safe_read_to_string;

/// Default number of CSV rows per record batch
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Date parsing configuration for report columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormatConfig {
    /// List of date format strings to try when parsing dates
    pub date_formats: Vec<String>,
    /// Enable heuristic format detection
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%m/%d/%y".to_string(), // US short year: 01/15/23, must precede %m/%d/%Y
                "%m/%d/%Y".to_string(), // US: 01/15/2023
                "%Y/%m/%d".to_string(), // 2023/01/15
                "%m-%d-%Y".to_string(), // 01-15-2023
                "%Y%m%d".to_string(),   // Compact: 20230115
                "%d %b %Y".to_string(), // 15 Jan 2023
                "%b %d, %Y".to_string(), // Jan 15, 2023
            ],
            enable_format_detection: true,
        }
    }
}

/// Configuration for reading report files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Rows per record batch when reading CSV files
    pub batch_size: usize,
    /// Skip a leading title line containing the word "report"
    pub detect_title_line: bool,
    /// Date parsing configuration
    pub date_format_config: DateFormatConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            detect_title_line: true,
            date_format_config: DateFormatConfig::default(),
        }
    }
}

/// Thresholds and policies for the cohort reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortConfig {
    /// Latest A1C at or above this value marks a poorly-controlled diabetic
    pub a1c_threshold: f64,
    /// Systolic readings strictly above this value are elevated
    pub systolic_threshold: f64,
    /// Diastolic readings strictly above this value are elevated
    pub diastolic_threshold: f64,
    /// Minimum number of consecutive elevated dates in a run
    pub min_run_length: usize,
    /// Also require the run to end on the patient's latest reading
    pub require_latest_reading: bool,
    /// Ignore observations dated after this day
    pub as_of: Option<NaiveDate>,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            a1c_threshold: 8.0,
            systolic_threshold: 140.0,
            diastolic_threshold: 90.0,
            min_run_length: 3,
            require_latest_reading: false,
            as_of: None,
        }
    }
}

impl CohortConfig {
    /// Check that the thresholds can be used for cohort queries
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("a1c_threshold", self.a1c_threshold),
            ("systolic_threshold", self.systolic_threshold),
            ("diastolic_threshold", self.diastolic_threshold),
        ] {
            if !value.is_finite() {
                return Err(CohortError::config(format!("{name} must be a finite number")));
            }
        }

        if self.min_run_length == 0 {
            return Err(CohortError::config("min_run_length must be at least 1"));
        }

        Ok(())
    }
}

/// Combined configuration file layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Report ingestion settings
    pub ingest: IngestConfig,
    /// Cohort query settings
    pub cohort: CohortConfig,
}

impl EngineConfig {
    /// Parse and validate a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "engine configuration")?;
        Self::from_json_str(&content)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        if self.ingest.batch_size == 0 {
            return Err(CohortError::config("batch_size must be at least 1"));
        }
        self.cohort.validate()
    }
}

impl fmt::Display for CohortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cohort Configuration:")?;
        writeln!(f, "  A1C Threshold (>=): {}", self.a1c_threshold)?;
        writeln!(f, "  Systolic Threshold (>): {}", self.systolic_threshold)?;
        writeln!(f, "  Diastolic Threshold (>): {}", self.diastolic_threshold)?;
        writeln!(f, "  Minimum Run Length: {}", self.min_run_length)?;
        writeln!(f, "  Require Latest Reading: {}", self.require_latest_reading)?;
        if let Some(as_of) = self.as_of {
            writeln!(f, "  As Of: {as_of}")?;
        }
        Ok(())
    }
}
