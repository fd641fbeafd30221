use cohort_engine::algorithm::classify::medication_table;
use cohort_engine::models::{MedicationRecord, Patient, PatientStatus};
use cohort_engine::{
    ClinicalDataset, CohortConfig, complexity_statistics, diabetic_cohort, hypertensive_cohort,
};

use crate::utils::{a1c, active_patient, assert_close, bp, date};

fn medication(patient_id: u64, name: &str) -> MedicationRecord {
    MedicationRecord::classified(patient_id, name, &medication_table())
}

#[test]
fn test_diabetic_row_uses_latest_result_and_medication_flags() {
    let mut dataset = ClinicalDataset::new();
    dataset.replace_patients(vec![active_patient(1, 64, 10)], 0);
    dataset.replace_a1c(
        vec![a1c(1, date(2024, 1, 1), 9.5), a1c(1, date(2024, 6, 1), 8.2)],
        0,
    );
    dataset.replace_medications(vec![medication(1, "insulin glargine 100 unit/mL")], 0);

    let rows = diabetic_cohort(&dataset, &CohortConfig::default());
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.patient_id, 1);
    assert_eq!(row.latest_a1c_date, date(2024, 6, 1));
    assert_close(row.latest_a1c, 8.2);
    assert!(row.on_insulin);
    assert!(!row.on_glp1);
}

#[test]
fn test_diabetic_threshold_and_ordering() {
    let mut dataset = ClinicalDataset::new();
    dataset.replace_patients(
        vec![
            active_patient(1, 60, 10),
            active_patient(2, 60, 10),
            active_patient(3, 60, 10),
            active_patient(4, 60, 10),
            Patient::new(5, 60, "M", 10, PatientStatus::Inactive),
        ],
        0,
    );
    dataset.replace_a1c(
        vec![
            a1c(1, date(2024, 3, 1), 11.0),
            a1c(2, date(2024, 3, 1), 8.0),
            a1c(3, date(2024, 3, 1), 7.9),
            a1c(4, date(2024, 3, 1), 8.0),
            a1c(5, date(2024, 3, 1), 12.0),
        ],
        0,
    );

    let rows = diabetic_cohort(&dataset, &CohortConfig::default());
    let ids: Vec<u64> = rows.iter().map(|row| row.patient_id).collect();
    assert_eq!(ids, vec![2, 4, 1]);
}

#[test]
fn test_diabetic_custom_threshold() {
    let mut dataset = ClinicalDataset::new();
    dataset.replace_patients(vec![active_patient(1, 60, 10)], 0);
    dataset.replace_a1c(vec![a1c(1, date(2024, 3, 1), 7.5)], 0);

    let config = CohortConfig {
        a1c_threshold: 7.0,
        ..CohortConfig::default()
    };
    assert_eq!(diabetic_cohort(&dataset, &config).len(), 1);
}

#[test]
fn test_hypertensive_cohort_membership_and_order() {
    let mut dataset = ClinicalDataset::new();
    dataset.replace_patients(
        vec![
            active_patient(1, 70, 10),
            active_patient(2, 58, 10),
            active_patient(3, 66, 20),
        ],
        0,
    );
    dataset.replace_blood_pressure(
        vec![
            // patient 1: three elevated dates, the last at 150/85
            bp(1, date(2024, 3, 1), 160, 100),
            bp(1, date(2024, 3, 2), 145, 80),
            bp(1, date(2024, 3, 3), 150, 85),
            // patient 2: 150/95, 145/92, 138/88, 160/100, 170/105
            bp(2, date(2024, 3, 1), 150, 95),
            bp(2, date(2024, 3, 2), 145, 92),
            bp(2, date(2024, 3, 3), 138, 88),
            bp(2, date(2024, 3, 4), 160, 100),
            bp(2, date(2024, 3, 5), 170, 105),
            // patient 3: elevated on diastolic only, two readings on the last day
            bp(3, date(2024, 3, 1), 130, 95),
            bp(3, date(2024, 3, 2), 130, 95),
            bp(3, date(2024, 3, 3), 138, 96),
            bp(3, date(2024, 3, 3), 128, 99),
        ],
        0,
    );

    let rows = hypertensive_cohort(&dataset, &CohortConfig::default());
    let summary: Vec<(u64, u32, u32, usize)> = rows
        .iter()
        .map(|row| (row.patient_id, row.systolic, row.diastolic, row.run_length))
        .collect();
    assert_eq!(summary, vec![(3, 128, 96, 3), (1, 150, 85, 3)]);
    assert_eq!(rows[1].latest_bp_date, date(2024, 3, 3));
    assert_eq!(rows[1].run_start, date(2024, 3, 1));
}

#[test]
fn test_hypertensive_as_of_cuts_series() {
    let mut dataset = ClinicalDataset::new();
    dataset.replace_patients(vec![active_patient(1, 70, 10)], 0);
    dataset.replace_blood_pressure(
        vec![
            bp(1, date(2024, 3, 1), 150, 95),
            bp(1, date(2024, 3, 2), 150, 95),
            bp(1, date(2024, 3, 3), 150, 95),
            bp(1, date(2024, 3, 4), 120, 70),
        ],
        0,
    );

    let as_of = CohortConfig {
        as_of: Some(date(2024, 3, 3)),
        require_latest_reading: true,
        ..CohortConfig::default()
    };
    assert_eq!(hypertensive_cohort(&dataset, &as_of).len(), 1);

    let strict = CohortConfig {
        require_latest_reading: true,
        ..CohortConfig::default()
    };
    assert!(hypertensive_cohort(&dataset, &strict).is_empty());
}

#[test]
fn test_complexity_requires_medications_and_risk_score() {
    let mut dataset = ClinicalDataset::new();
    dataset.replace_patients(
        vec![
            active_patient(1, 40, 10),
            active_patient(2, 60, 10),
            active_patient(3, 80, 10),
        ],
        0,
    );
    dataset.replace_medications(
        vec![
            medication(1, "metformin"),
            medication(2, "lisinopril"),
            medication(2, "amlodipine"),
            medication(2, "unlisted supplement"),
        ],
        0,
    );
    dataset.replace_risk_scores(
        vec![
            cohort_engine::models::RiskScore { patient_id: 1, score: 0.5 },
            cohort_engine::models::RiskScore { patient_id: 3, score: 2.5 },
            cohort_engine::models::RiskScore { patient_id: 2, score: 1.5 },
        ],
        0,
    );

    let rows = complexity_statistics(&dataset);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    // patient 3 has no medication record
    assert_eq!(row.patient_count, 2);
    assert_close(row.avg_age, 50.0);
    assert_close(row.avg_medication_count, 2.0);
    assert_close(row.avg_risk_score, 1.0);
    assert_close(row.fraction_diabetic, 0.0);
    assert_eq!(row.provider_name, None);
}
