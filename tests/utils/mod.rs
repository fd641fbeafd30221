use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use cohort_engine::models::{LabObservation, Patient, PatientStatus, VitalObservation};
use tempfile::TempDir;

/// Build a date, panicking on invalid input
#[must_use]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// An active patient with the given age and primary provider
#[must_use]
pub fn active_patient(id: u64, age: u32, provider: u64) -> Patient {
    Patient::new(id, age, "F", provider, PatientStatus::Active)
}

/// An A1C result
#[must_use]
pub fn a1c(patient_id: u64, date: NaiveDate, value: f64) -> LabObservation {
    LabObservation {
        patient_id,
        date,
        value,
    }
}

/// A blood pressure reading
#[must_use]
pub fn bp(patient_id: u64, date: NaiveDate, systolic: u32, diastolic: u32) -> VitalObservation {
    VitalObservation {
        patient_id,
        date,
        systolic,
        diastolic,
    }
}

/// Write `content` to `dir/name`
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write test report");
    path
}

pub const PATIENTS_CSV: &str = "\
Active Patient Report
EnterpriseID,Patient Age,PatientSex,Prim Prvdr,Status,Ptnt Dcsd YSN
1,64,F,10,A,N
2,58,M,10,a,N
3,71,F,20,A,N
4,45,M,20,I,N
5,50,F,20,A,N
6,,F,20,A,N
";

pub const MEDICATIONS_CSV: &str = "\
enterpriseid,Med Names (single)
1,Lantus Solostar 100 unit/mL
1,metformin 1000 mg tablet
2,lisinopril 20 mg
3,amlodipine 5 mg
3,hydrochlorothiazide 25 mg
5,Ozempic 0.5 mg/dose
5,atorvastatin 40 mg
";

pub const A1C_CSV: &str = "\
enterpriseid,labdate,labvalue
1,01/01/2024,9.5
1,06/01/2024,8.2%
3,05/15/2024,7.9
4,05/15/2024,10.0
5,2024-04-02,8.0
5,04/03/2024,pending
";

pub const BLOOD_PRESSURE_CSV: &str = "\
enterpriseid,Enc BP,Enc BP Date
2,150/95,03/01/2024
2,145/92,03/08/2024
2,138/88,03/15/2024
2,160/100,03/22/2024
2,170/105,03/29/2024
3,152/96,04/01/2024
3,148/88,04/08/2024
3,162/94,04/15/2024
3,n/a,04/16/2024
";

pub const RAF_CSV: &str = "\
enterpriseid,HCC RAF Score
1,1.2
2,0.8
3,2.0
4,3.0
5,0.6
";

pub const ENCOUNTERS_CSV: &str = "\
Cln Enc ID,enterpriseid,PrvdrID,Cln Enc Date,ApptType
100,1,10,01/01/2024,Office Visit
101,3,20,04/01/2024,Office Visit
102,5,20,04/02/2024,Telehealth
";

pub const ENCOUNTER_DIAGNOSES_CSV: &str = "\
cln enc id,ICD10EncounterDiagCode
100,E11.65
101,I10
102,e11.9
";

pub const ENCOUNTER_PROCEDURES_CSV: &str = "\
cln enc id,Enc Srv ProcCode
100,99214
101,99213
";

pub const PROVIDERS_CSV: &str = "\
PrvdrID,Prvdr,PrvdrFrstNme,PrvdrLstNme,PrvdrType
10,SMITHJ,Jane,Smith,MD
20,LEEK,Kim,Lee,NP
";

/// A directory holding one CSV file for every report table
///
/// Patient 1 is a poorly controlled diabetic on insulin, patient 2 has
/// broken runs of high blood pressure, patient 3 has three consecutive
/// elevated dates, patient 4 is inactive and patient 5 has an A1C of exactly
/// 8.0 and takes a GLP-1 agonist. Patients, A1C and blood pressure each carry
/// one malformed row.
#[must_use]
pub fn sample_report_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    for (name, content) in [
        ("patients.csv", PATIENTS_CSV),
        ("medications.csv", MEDICATIONS_CSV),
        ("a1c.csv", A1C_CSV),
        ("blood_pressure.csv", BLOOD_PRESSURE_CSV),
        ("raf_scores.csv", RAF_CSV),
        ("encounters.csv", ENCOUNTERS_CSV),
        ("encounter_diagnoses.csv", ENCOUNTER_DIAGNOSES_CSV),
        ("encounter_procedures.csv", ENCOUNTER_PROCEDURES_CSV),
        ("providers.csv", PROVIDERS_CSV),
    ] {
        write_file(dir.path(), name, content);
    }
    dir
}

/// Assert two floats agree to within `1e-9`
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
