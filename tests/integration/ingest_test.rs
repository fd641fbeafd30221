use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use cohort_engine::algorithm::classify::{Classifiers, DiagnosisGroup, MedicationClass};
use cohort_engine::collections::TableData;
use cohort_engine::ingest::{find_report_files, load_directory_into};
use cohort_engine::{
    ClinicalDataset, CohortError, FileFormat, IngestConfig, TableKind, load_dataset, load_table,
};

use crate::utils::{date, sample_report_dir, write_file};

#[test]
fn test_load_sample_directory() {
    let dir = sample_report_dir();
    let dataset =
        load_dataset(dir.path(), &IngestConfig::default(), &Classifiers::default()).unwrap();

    assert_eq!(dataset.patients().len(), 5);
    assert_eq!(dataset.active_patients().count(), 4);
    assert_eq!(dataset.medications().len(), 7);
    assert_eq!(dataset.a1c().len(), 5);
    assert_eq!(dataset.blood_pressure().len(), 8);
    assert_eq!(dataset.risk_scores().len(), 5);
    assert_eq!(dataset.encounters().len(), 3);
    assert_eq!(dataset.encounter_diagnoses().len(), 3);
    assert_eq!(dataset.encounter_procedures().len(), 2);
    assert_eq!(dataset.providers().len(), 2);

    for (table, skipped) in [
        (TableKind::Patients, 1),
        (TableKind::A1c, 1),
        (TableKind::BloodPressure, 1),
        (TableKind::Medications, 0),
        (TableKind::Providers, 0),
    ] {
        assert_eq!(
            dataset.latest_import(table).map(|import| import.skipped),
            Some(skipped),
            "{table}"
        );
    }
}

#[test]
fn test_values_are_parsed_and_classified() {
    let dir = sample_report_dir();
    let dataset =
        load_dataset(dir.path(), &IngestConfig::default(), &Classifiers::default()).unwrap();

    let patient = dataset.patients().iter().find(|p| p.id == 2).unwrap();
    assert!(patient.is_active());
    assert_eq!(patient.deceased.as_deref(), Some("N"));

    let percent = dataset
        .a1c()
        .iter()
        .find(|obs| obs.patient_id == 1 && obs.date == date(2024, 6, 1))
        .unwrap();
    assert!((percent.value - 8.2).abs() < 1e-9);

    let iso = dataset.a1c().iter().find(|obs| obs.patient_id == 5).unwrap();
    assert_eq!(iso.date, date(2024, 4, 2));

    let first_bp = &dataset.blood_pressure()[0];
    assert_eq!((first_bp.systolic, first_bp.diastolic), (150, 95));
    assert_eq!(first_bp.date, date(2024, 3, 1));

    let classes: Vec<Option<MedicationClass>> =
        dataset.medications().iter().map(|med| med.class).collect();
    assert_eq!(
        classes,
        vec![
            Some(MedicationClass::Insulin),
            Some(MedicationClass::Metformin),
            Some(MedicationClass::AceInhibitor),
            Some(MedicationClass::DhpCcb),
            Some(MedicationClass::Thiazide),
            Some(MedicationClass::Glp1),
            Some(MedicationClass::Statin),
        ]
    );

    let diabetic = dataset.patients_with_diagnosis(DiagnosisGroup::Diabetes);
    assert!(diabetic.contains(&1) && diabetic.contains(&5));
    assert_eq!(diabetic.len(), 2);
}

#[test]
fn test_missing_required_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "a1c.csv", "enterpriseid,labdate\n1,06/01/2024\n");

    let err = load_table(
        &path,
        TableKind::A1c,
        &IngestConfig::default(),
        &Classifiers::default(),
    )
    .unwrap_err();
    match err {
        CohortError::MissingColumns { missing, found, .. } => {
            assert_eq!(missing, vec!["labvalue".to_string()]);
            assert_eq!(found, vec!["enterpriseid".to_string(), "labdate".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_title_detection_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "raf_scores.csv",
        "Risk Report,run 06/30/2024\nenterpriseid,hcc raf score\n1,1.1\n",
    );
    let config = IngestConfig {
        detect_title_line: false,
        ..IngestConfig::default()
    };
    let err = load_table(&path, TableKind::RiskScores, &config, &Classifiers::default())
        .unwrap_err();
    assert!(matches!(err, CohortError::MissingColumns { .. }));
}

#[test]
fn test_parquet_report_with_typed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raf_scores.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("EnterpriseID", DataType::Int64, true),
        Field::new("HCC RAF Score", DataType::Float64, true),
    ]));
    let ids: ArrayRef = Arc::new(Int64Array::from(vec![Some(11), Some(12), None]));
    let scores: ArrayRef = Arc::new(Float64Array::from(vec![Some(0.75), Some(1.5), Some(2.0)]));
    let batch = RecordBatch::try_new(Arc::clone(&schema), vec![ids, scores]).unwrap();

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let loaded = load_table(
        &path,
        TableKind::RiskScores,
        &IngestConfig::default(),
        &Classifiers::default(),
    )
    .unwrap();
    assert_eq!(loaded.skipped, 1);
    match loaded.data {
        TableData::RiskScores(scores) => {
            assert_eq!(scores.len(), 2);
            assert_eq!(scores[1].patient_id, 12);
            assert!((scores[1].score - 1.5).abs() < 1e-9);
        }
        other => panic!("unexpected table: {:?}", other.kind()),
    }
}

#[test]
fn test_csv_preferred_over_parquet() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "providers.csv", "prvdrid\n1\n");
    write_file(dir.path(), "providers.parquet", "not parquet");
    write_file(dir.path(), "notes.txt", "ignored");

    let files = find_report_files(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].kind, TableKind::Providers);
    assert_eq!(
        FileFormat::from_path(&files[0].path).unwrap(),
        FileFormat::Csv
    );
}

#[test]
fn test_file_stems_match_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "Patients.CSV", "enterpriseid\n1\n");
    write_file(dir.path(), "A1C.pq", "not parquet");
    write_file(dir.path(), "labs.csv", "enterpriseid\n1\n");

    let files = find_report_files(dir.path()).unwrap();
    let kinds: Vec<TableKind> = files.iter().map(|file| file.kind).collect();
    assert_eq!(kinds, vec![TableKind::Patients, TableKind::A1c]);
    assert_eq!(
        FileFormat::from_path(&files[1].path).unwrap(),
        FileFormat::Parquet
    );
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = load_dataset(&missing, &IngestConfig::default(), &Classifiers::default())
        .unwrap_err();
    assert!(matches!(err, CohortError::NotFound(_)));
}

#[test]
fn test_reload_replaces_only_present_tables() {
    let dir = sample_report_dir();
    let classifiers = Classifiers::default();
    let mut dataset = ClinicalDataset::new();
    load_directory_into(&mut dataset, dir.path(), &IngestConfig::default(), &classifiers).unwrap();

    let update = tempfile::tempdir().unwrap();
    write_file(
        update.path(),
        "providers.csv",
        "PrvdrID,Prvdr,PrvdrFrstNme,PrvdrLstNme,PrvdrType\n30,NEWP,Pat,New,PA\n",
    );
    let files =
        load_directory_into(&mut dataset, update.path(), &IngestConfig::default(), &classifiers)
            .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(dataset.providers().len(), 1);
    assert_eq!(dataset.providers()[0].id, 30);
    assert_eq!(dataset.patients().len(), 5);
    assert_eq!(
        dataset
            .imports()
            .iter()
            .filter(|import| import.table == TableKind::Providers)
            .count(),
        2
    );
}
