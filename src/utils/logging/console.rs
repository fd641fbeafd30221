//! Console output utilities
//!
//! Plain-text summaries of the loaded dataset and the produced reports.

use std::fmt::Display;
use std::path::Path;

use crate::collections::TableSummary;

/// Print row counts and import times for every table
pub fn print_dataset_summary(summary: &[TableSummary]) {
    println!("Dataset:");
    for table in summary {
        println!("  {table}");
    }
}

/// Print a report's row count, where it was written and its first rows
pub fn print_report_summary<R: Display>(title: &str, rows: &[R], path: Option<&Path>, preview: usize) {
    match path {
        Some(path) => println!("{title}: {} rows -> {}", rows.len(), path.display()),
        None => println!("{title}: {} rows", rows.len()),
    }
    for row in rows.iter().take(preview) {
        println!("  {row}");
    }
    if rows.len() > preview && preview > 0 {
        println!("  ... {} more", rows.len() - preview);
    }
}
