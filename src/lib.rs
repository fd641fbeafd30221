//! Cohort identification over clinical practice reports.
//!
//! Report files (patients, medications, A1C results, blood pressure
//! readings, risk scores, encounters, diagnoses, procedures and providers)
//! are loaded into a [`ClinicalDataset`]. Medication names and diagnosis
//! codes are classified at import time. Three reports run over the dataset:
//! poorly controlled diabetics, poorly controlled hypertensives and
//! per-provider patient complexity. Their rows can be exported as CSV or
//! Parquet.

pub mod algorithm;
pub mod collections;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{CohortConfig, DateFormatConfig, EngineConfig, IngestConfig, DEFAULT_BATCH_SIZE};
pub use error::{CohortError, Result};
pub use collections::{ClinicalDataset, TableImport, TableSummary};
pub use models::{PatientId, ProviderId, TableKind};

// Classification and cohort reports
pub use algorithm::classify::{
    CategoryTable, Classifiers, DiagnosisGroup, MatchMode, MedicationClass,
};
pub use algorithm::cohort::{
    ComplexityRow, DiabeticRow, HypertensiveRow, ReportKind, complexity_statistics,
    diabetic_cohort, hypertensive_cohort,
};

// File input and output
pub use export::{ReportSchema, write_report};
pub use ingest::{FileFormat, load_dataset, load_directory_into, load_table};

// Arrow types
pub use arrow::record_batch::RecordBatch;
