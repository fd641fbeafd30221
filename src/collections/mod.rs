//! In-memory dataset snapshot
//!
//! The [`ClinicalDataset`] holds one table per report kind. Tables are only
//! ever swapped as a whole, so a reader always sees either the previous
//! import or the new one.

pub mod dataset;

pub use dataset::{ClinicalDataset, LoadedTable, TableData, TableImport, TableSummary};
