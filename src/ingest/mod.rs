//! Report ingestion
//!
//! Reads the report files of a data directory into typed tables. A directory
//! holds at most one file per table, named after the table's file stem
//! (`patients.csv`, `a1c.parquet`, ...). Files are loaded in parallel and
//! merged into the dataset only after every file has loaded successfully.

pub mod columns;
pub mod date_utils;
pub mod reader;
pub mod tables;

use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::algorithm::classify::Classifiers;
use crate::collections::{ClinicalDataset, LoadedTable};
use crate::config::IngestConfig;
use crate::error::util::validate_directory;
use crate::error::{CohortError, Result};
use crate::models::TableKind;
use crate::utils::logging::{create_main_progress_bar, finish_and_clear, log_warning};

pub use columns::{BatchText, ColumnMap, RowText};
pub use reader::{FileFormat, ReportBatches, read_report};
pub use tables::{RowContext, TableBuilder, optional_columns, required_columns};

/// A report file and the table it holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    /// Table the file is loaded as
    pub kind: TableKind,
    /// Location of the file
    pub path: PathBuf,
}

/// Find the report file of every table present in `dir`
///
/// File stems are matched case-insensitively, so `Patients.CSV` is found as
/// the patients table. A table with both a CSV and a Parquet file is read
/// from the CSV file. Tables without a file are left out.
pub fn find_report_files(dir: &Path) -> Result<Vec<ReportFile>> {
    validate_directory(dir, "report data directory")?;

    let list_error =
        |e: std::io::Error| CohortError::io_at(dir, "failed to list report data directory", e);
    let mut found: FxHashMap<TableKind, Vec<(FileFormat, PathBuf)>> = FxHashMap::default();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if !path.is_file() {
            continue;
        }

        let kind = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(TableKind::from_file_stem);
        match (kind, FileFormat::from_path(&path)) {
            (Some(kind), Ok(format)) => found.entry(kind).or_default().push((format, path)),
            _ => log::debug!("Ignoring {}", path.display()),
        }
    }

    let files = TableKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let mut candidates = found.remove(&kind)?;
            candidates.sort_by(|(a_format, a_path), (b_format, b_path)| {
                (*a_format != FileFormat::Csv)
                    .cmp(&(*b_format != FileFormat::Csv))
                    .then_with(|| a_path.cmp(b_path))
            });

            let (_, path) = candidates.first()?.clone();
            if candidates.len() > 1 {
                log_warning(
                    &format!(
                        "Found {} files for {kind}; using {}",
                        candidates.len(),
                        path.display()
                    ),
                    Some(dir),
                );
            }
            Some(ReportFile { kind, path })
        })
        .collect();

    Ok(files)
}

/// Load one report file as the given table
pub fn load_table(
    path: &Path,
    kind: TableKind,
    config: &IngestConfig,
    classifiers: &Classifiers,
) -> Result<LoadedTable> {
    let report = read_report(path, config)?;
    let columns = ColumnMap::resolve(
        kind.display_name(),
        &report.schema,
        required_columns(kind),
        optional_columns(kind),
    )?;
    let absent: Vec<&str> = optional_columns(kind)
        .iter()
        .copied()
        .filter(|name| !columns.contains(name))
        .collect();
    if !absent.is_empty() {
        log::debug!("{kind} file {} has no {absent:?} columns", path.display());
    }

    let ctx = RowContext {
        dates: &config.date_format_config,
        classifiers,
    };
    let mut builder = TableBuilder::new(kind);
    for batch in &report.batches {
        let text = BatchText::new(batch, &columns)?;
        for index in 0..text.num_rows() {
            builder.push_row(&text.row(index), &ctx);
        }
    }

    let (data, skipped) = builder.finish();
    if skipped > 0 {
        log_warning(
            &format!("Skipped {skipped} {kind} rows with missing or malformed values"),
            Some(path),
        );
    }
    log::info!("Imported {} {kind} records", data.len());

    Ok(LoadedTable {
        data,
        skipped,
        source: Some(path.to_path_buf()),
    })
}

/// Load report files in parallel
///
/// Fails on the first file that cannot be loaded; no partial result is
/// returned in that case.
pub fn load_report_files(
    files: &[ReportFile],
    config: &IngestConfig,
    classifiers: &Classifiers,
) -> Result<Vec<LoadedTable>> {
    let progress = create_main_progress_bar(files.len() as u64, Some("Loading reports"));

    let loaded: Result<Vec<LoadedTable>> = files
        .par_iter()
        .progress_with(progress.clone())
        .map(|file| load_table(&file.path, file.kind, config, classifiers))
        .collect();

    finish_and_clear(&progress);
    loaded
}

/// Load every report file in `dir` into `dataset`
///
/// Tables without a file keep their current contents. Returns the files that
/// were loaded.
pub fn load_directory_into(
    dataset: &mut ClinicalDataset,
    dir: &Path,
    config: &IngestConfig,
    classifiers: &Classifiers,
) -> Result<Vec<ReportFile>> {
    let files = find_report_files(dir)?;
    for kind in TableKind::ALL {
        if !files.iter().any(|file| file.kind == kind) {
            log_warning(&format!("No {kind} report found"), Some(dir));
        }
    }

    for table in load_report_files(&files, config, classifiers)? {
        dataset.apply(table);
    }
    Ok(files)
}

/// Load a fresh dataset from the report files in `dir`
pub fn load_dataset(
    dir: &Path,
    config: &IngestConfig,
    classifiers: &Classifiers,
) -> Result<ClinicalDataset> {
    let mut dataset = ClinicalDataset::new();
    load_directory_into(&mut dataset, dir, config, classifiers)?;
    Ok(dataset)
}
