//! Reading report files into Arrow record batches
//!
//! CSV reports exported by the practice-management system sometimes start
//! with a title line ("Patient Report ...") above the real header. The title
//! is detected and skipped, every column is read as nullable text, and the
//! typed parsing happens later per table.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::IngestConfig;
use crate::error::util::safe_open_file;
use crate::error::{CohortError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// File formats a report can be read from or written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Comma separated values
    Csv,
    /// Apache Parquet
    Parquet,
}

impl FileFormat {
    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Determine the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(CohortError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A report file read into memory
#[derive(Debug, Clone)]
pub struct ReportBatches {
    /// Column layout of the file
    pub schema: SchemaRef,
    /// Record batches in file order
    pub batches: Vec<RecordBatch>,
}

impl ReportBatches {
    /// Total number of rows over all batches
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}

/// Whether a line is a report title rather than a header
#[must_use]
pub fn is_title_line(line: &str) -> bool {
    line.to_lowercase().contains("report")
}

/// Open a CSV file positioned at its header line
fn open_at_header(path: &Path, skip_title: bool) -> Result<BufReader<File>> {
    let mut reader = BufReader::new(safe_open_file(path, "reading CSV report")?);
    if skip_title {
        let mut title = String::new();
        reader.read_line(&mut title)?;
    }
    Ok(reader)
}

/// Read a CSV report, treating every column as nullable text
pub fn read_csv_report(path: &Path, config: &IngestConfig) -> Result<ReportBatches> {
    let start = std::time::Instant::now();
    log_operation_start("Reading CSV report", path);

    let skip_title = if config.detect_title_line {
        let mut first_line = String::new();
        open_at_header(path, false)?.read_line(&mut first_line)?;
        is_title_line(&first_line)
    } else {
        false
    };
    if skip_title {
        log::debug!("Skipping title line in {}", path.display());
    }

    // Only the header names are taken from inference; every column is text
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(open_at_header(path, skip_title)?, Some(0))?;
    let schema: SchemaRef = Arc::new(Schema::new(
        inferred
            .fields()
            .iter()
            .map(|field| Field::new(field.name().trim(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let reader = ReaderBuilder::new(Arc::clone(&schema))
        .with_header(true)
        .with_batch_size(config.batch_size)
        .with_truncated_rows(true)
        .build(open_at_header(path, skip_title)?)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let report = ReportBatches { schema, batches };
    log_operation_complete("read", path, report.num_rows(), Some(start.elapsed()));
    Ok(report)
}

/// Read a Parquet report
pub fn read_parquet_report(path: &Path, config: &IngestConfig) -> Result<ReportBatches> {
    let start = std::time::Instant::now();
    log_operation_start("Reading Parquet report", path);

    let file = safe_open_file(path, "reading Parquet report")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = Arc::clone(builder.schema());
    let reader = builder.with_batch_size(config.batch_size).build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let report = ReportBatches { schema, batches };
    log_operation_complete("read", path, report.num_rows(), Some(start.elapsed()));
    Ok(report)
}

/// Read a report in whichever format its extension names
pub fn read_report(path: &Path, config: &IngestConfig) -> Result<ReportBatches> {
    match FileFormat::from_path(path)? {
        FileFormat::Csv => read_csv_report(path, config),
        FileFormat::Parquet => read_parquet_report(path, config),
    }
}
