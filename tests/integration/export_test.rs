use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use cohort_engine::algorithm::cohort::{DiabeticRow, HypertensiveRow};
use cohort_engine::export::{write_batch, write_report};
use cohort_engine::{CohortError, FileFormat, ReportKind, ReportSchema};

use crate::utils::date;

fn diabetic_rows() -> Vec<DiabeticRow> {
    vec![
        DiabeticRow {
            patient_id: 5,
            age: 50,
            sex: "F".to_string(),
            primary_provider: 20,
            latest_a1c_date: date(2024, 4, 2),
            latest_a1c: 8.0,
            on_insulin: false,
            on_glp1: true,
        },
        DiabeticRow {
            patient_id: 1,
            age: 64,
            sex: "F".to_string(),
            primary_provider: 10,
            latest_a1c_date: date(2024, 6, 1),
            latest_a1c: 8.2,
            on_insulin: true,
            on_glp1: false,
        },
    ]
}

#[test]
fn test_csv_export_has_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(&diabetic_rows(), ReportKind::Diabetic, FileFormat::Csv, dir.path())
        .unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("poorly_cont_dm_output_"), "{name}");
    assert!(name.ends_with(".csv"), "{name}");

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "patient_id,age,sex,primary_provider,latest_a1c_date,latest_a1c,on_insulin,on_glp1"
    );
    assert!(lines[1].starts_with("5,50,F,20,04/02/2024,"));
    assert!(lines[2].contains("06/01/2024"));
}

#[test]
fn test_parquet_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_report(
        &diabetic_rows(),
        ReportKind::Diabetic,
        FileFormat::Parquet,
        dir.path(),
    )
    .unwrap();
    assert_eq!(path.extension().unwrap(), "parquet");

    let file = std::fs::File::open(&path).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
    let rows: usize = batches.iter().map(|batch| batch.num_rows()).sum();
    assert_eq!(rows, 2);
    assert_eq!(batches[0].schema().fields().len(), 8);
}

#[test]
fn test_empty_report_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let rows: Vec<HypertensiveRow> = Vec::new();
    let path = write_report(&rows, ReportKind::Hypertensive, FileFormat::Csv, dir.path()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);
    assert!(content.starts_with("patient_id,age,sex,primary_provider,latest_bp_date"));
}

#[test]
fn test_write_batch_to_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diabetic.csv");
    let batch = DiabeticRow::to_record_batch(&diabetic_rows()).unwrap();
    write_batch(&batch, FileFormat::Csv, &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
}

#[test]
fn test_missing_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = write_report(
        &diabetic_rows(),
        ReportKind::Diabetic,
        FileFormat::Csv,
        &dir.path().join("missing"),
    )
    .unwrap_err();
    assert!(matches!(err, CohortError::NotFound(_)));
}
