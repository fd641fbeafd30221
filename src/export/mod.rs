//! Report export
//!
//! Cohort rows are converted to Arrow record batches with `serde_arrow`
//! against an explicit schema per row type, then written as CSV or Parquet.
//! Dates are exported as `MM/DD/YYYY` text.

pub mod schema;

use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Local};
use parquet::arrow::ArrowWriter;

use crate::algorithm::cohort::ReportKind;
use crate::error::util::{safe_create_file, validate_directory};
use crate::error::Result;
use crate::ingest::FileFormat;

pub use schema::ReportSchema;

/// File name of a report produced at `timestamp`
///
/// `poorly_cont_dm_output_20240601_0930.csv`
#[must_use]
pub fn report_file_name(kind: ReportKind, format: FileFormat, timestamp: DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        kind.file_prefix(),
        timestamp.format("%Y%m%d_%H%M"),
        format.extension()
    )
}

/// Write a record batch as a CSV file with a header line
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = safe_create_file(path, "CSV report")?;
    let mut writer = arrow::csv::WriterBuilder::new()
        .with_header(true)
        .build(file);
    writer.write(batch)?;
    Ok(())
}

/// Write a record batch as a Parquet file
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = safe_create_file(path, "Parquet report")?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// Write a record batch in the given format
pub fn write_batch(batch: &RecordBatch, format: FileFormat, path: &Path) -> Result<()> {
    match format {
        FileFormat::Csv => write_csv(batch, path),
        FileFormat::Parquet => write_parquet(batch, path),
    }
}

/// Write a report into `output_dir` under a timestamped name
///
/// An empty report still produces a file holding only the header (CSV) or
/// the schema (Parquet). Returns the path of the written file.
pub fn write_report<R: ReportSchema>(
    rows: &[R],
    kind: ReportKind,
    format: FileFormat,
    output_dir: &Path,
) -> Result<PathBuf> {
    validate_directory(output_dir, "report output directory")?;

    let path = output_dir.join(report_file_name(kind, format, Local::now()));
    let batch = R::to_record_batch(rows)?;
    write_batch(&batch, format, &path)?;

    log::info!("Wrote {} rows of {kind} to {}", batch.num_rows(), path.display());
    Ok(path)
}
