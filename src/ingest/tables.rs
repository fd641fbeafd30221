//! Per-table column layouts and row extraction
//!
//! Each report table names the columns it requires, the optional columns it
//! reads when present, and how one row of text becomes a typed record. Rows
//! missing a required value, or with a value that does not parse, are skipped
//! and counted.

use crate::algorithm::classify::Classifiers;
use crate::collections::TableData;
use crate::config::DateFormatConfig;
use crate::ingest::columns::RowText;
use crate::models::{
    Encounter, EncounterDiagnosis, EncounterProcedure, LabObservation, MedicationRecord, Patient,
    PatientStatus, Provider, RiskScore, TableKind, VitalObservation, parse_a1c_value,
    parse_blood_pressure,
};

const ENTERPRISE_ID: &str = "enterpriseid";
const ENCOUNTER_ID: &str = "cln enc id";
const PROVIDER_ID: &str = "prvdrid";

/// Columns a table cannot be loaded without
#[must_use]
pub const fn required_columns(kind: TableKind) -> &'static [&'static str] {
    match kind {
        TableKind::Patients => &[ENTERPRISE_ID, "patient age", "patientsex", "prim prvdr", "status"],
        TableKind::Medications => &[ENTERPRISE_ID, "med names (single)"],
        TableKind::A1c => &[ENTERPRISE_ID, "labdate", "labvalue"],
        TableKind::BloodPressure => &[ENTERPRISE_ID, "enc bp", "enc bp date"],
        TableKind::RiskScores => &[ENTERPRISE_ID, "hcc raf score"],
        TableKind::Encounters => &[ENCOUNTER_ID, ENTERPRISE_ID, PROVIDER_ID, "cln enc date", "appttype"],
        TableKind::EncounterDiagnoses => &[ENCOUNTER_ID, "icd10encounterdiagcode"],
        TableKind::EncounterProcedures => &[ENCOUNTER_ID, "enc srv proccode"],
        TableKind::Providers => &[PROVIDER_ID, "prvdr", "prvdrfrstnme", "prvdrlstnme", "prvdrtype"],
    }
}

/// Columns read when the file has them
#[must_use]
pub const fn optional_columns(kind: TableKind) -> &'static [&'static str] {
    match kind {
        TableKind::Patients => &[
            "ptnt dcsd ysn",
            "patient primary ins pkg name",
            "patient primary ins pkg type",
            "patient secondary ins pkg name",
            "patient secondary ins pkg type",
        ],
        _ => &[],
    }
}

/// Shared state for turning rows into records
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    /// Date formats for date columns
    pub dates: &'a DateFormatConfig,
    /// Tables used to classify medications and diagnoses
    pub classifiers: &'a Classifiers,
}

/// Accumulates the records of one table while rows are read
#[derive(Debug)]
pub struct TableBuilder {
    data: TableData,
    skipped: usize,
}

impl TableBuilder {
    /// Start an empty table of the given kind
    #[must_use]
    pub const fn new(kind: TableKind) -> Self {
        let data = match kind {
            TableKind::Patients => TableData::Patients(Vec::new()),
            TableKind::Medications => TableData::Medications(Vec::new()),
            TableKind::A1c => TableData::A1c(Vec::new()),
            TableKind::BloodPressure => TableData::BloodPressure(Vec::new()),
            TableKind::RiskScores => TableData::RiskScores(Vec::new()),
            TableKind::Encounters => TableData::Encounters(Vec::new()),
            TableKind::EncounterDiagnoses => TableData::EncounterDiagnoses(Vec::new()),
            TableKind::EncounterProcedures => TableData::EncounterProcedures(Vec::new()),
            TableKind::Providers => TableData::Providers(Vec::new()),
        };
        Self { data, skipped: 0 }
    }

    /// Parse one row and keep it, or count it as skipped
    pub fn push_row(&mut self, row: &RowText<'_>, ctx: &RowContext<'_>) {
        let kept = match &mut self.data {
            TableData::Patients(rows) => push(rows, patient_from_row(row)),
            TableData::Medications(rows) => push(rows, medication_from_row(row, ctx)),
            TableData::A1c(rows) => push(rows, a1c_from_row(row, ctx)),
            TableData::BloodPressure(rows) => push(rows, blood_pressure_from_row(row, ctx)),
            TableData::RiskScores(rows) => push(rows, risk_score_from_row(row)),
            TableData::Encounters(rows) => push(rows, encounter_from_row(row, ctx)),
            TableData::EncounterDiagnoses(rows) => push(rows, diagnosis_from_row(row, ctx)),
            TableData::EncounterProcedures(rows) => push(rows, procedure_from_row(row)),
            TableData::Providers(rows) => push(rows, provider_from_row(row)),
        };
        if !kept {
            self.skipped += 1;
        }
    }

    /// Records parsed so far and the number of skipped rows
    #[must_use]
    pub fn finish(self) -> (TableData, usize) {
        (self.data, self.skipped)
    }
}

fn push<T>(rows: &mut Vec<T>, record: Option<T>) -> bool {
    let Some(record) = record else {
        return false;
    };
    rows.push(record);
    true
}

fn patient_from_row(row: &RowText<'_>) -> Option<Patient> {
    Some(Patient {
        id: row.whole_number(ENTERPRISE_ID)?,
        age: row.age("patient age")?,
        sex: row.string("patientsex")?,
        primary_provider: row.whole_number("prim prvdr")?,
        status: PatientStatus::from(row.text("status")?),
        deceased: row.string("ptnt dcsd ysn"),
        primary_insurance_name: row.string("patient primary ins pkg name"),
        primary_insurance_type: row.string("patient primary ins pkg type"),
        secondary_insurance_name: row.string("patient secondary ins pkg name"),
        secondary_insurance_type: row.string("patient secondary ins pkg type"),
    })
}

fn medication_from_row(row: &RowText<'_>, ctx: &RowContext<'_>) -> Option<MedicationRecord> {
    Some(MedicationRecord::classified(
        row.whole_number(ENTERPRISE_ID)?,
        row.text("med names (single)")?,
        &ctx.classifiers.medications,
    ))
}

fn a1c_from_row(row: &RowText<'_>, ctx: &RowContext<'_>) -> Option<LabObservation> {
    Some(LabObservation {
        patient_id: row.whole_number(ENTERPRISE_ID)?,
        date: row.date("labdate", ctx.dates)?,
        value: parse_a1c_value(row.text("labvalue")?)?,
    })
}

fn blood_pressure_from_row(row: &RowText<'_>, ctx: &RowContext<'_>) -> Option<VitalObservation> {
    let (systolic, diastolic) = parse_blood_pressure(row.text("enc bp")?)?;
    Some(VitalObservation {
        patient_id: row.whole_number(ENTERPRISE_ID)?,
        date: row.date("enc bp date", ctx.dates)?,
        systolic,
        diastolic,
    })
}

fn risk_score_from_row(row: &RowText<'_>) -> Option<RiskScore> {
    Some(RiskScore {
        patient_id: row.whole_number(ENTERPRISE_ID)?,
        score: row.decimal("hcc raf score")?,
    })
}

fn encounter_from_row(row: &RowText<'_>, ctx: &RowContext<'_>) -> Option<Encounter> {
    Some(Encounter {
        id: row.whole_number(ENCOUNTER_ID)?,
        patient_id: row.whole_number(ENTERPRISE_ID)?,
        provider_id: row.whole_number(PROVIDER_ID)?,
        date: row.date("cln enc date", ctx.dates)?,
        appointment_type: row.string("appttype")?,
    })
}

fn diagnosis_from_row(row: &RowText<'_>, ctx: &RowContext<'_>) -> Option<EncounterDiagnosis> {
    Some(EncounterDiagnosis::classified(
        row.whole_number(ENCOUNTER_ID)?,
        row.text("icd10encounterdiagcode")?,
        &ctx.classifiers.diagnoses,
    ))
}

fn procedure_from_row(row: &RowText<'_>) -> Option<EncounterProcedure> {
    Some(EncounterProcedure {
        encounter_id: row.whole_number(ENCOUNTER_ID)?,
        procedure_code: row.string("enc srv proccode")?,
    })
}

fn provider_from_row(row: &RowText<'_>) -> Option<Provider> {
    Some(Provider {
        id: row.whole_number(PROVIDER_ID)?,
        name: row.string("prvdr")?,
        first_name: row.string("prvdrfrstnme")?,
        last_name: row.string("prvdrlstnme")?,
        provider_type: row.string("prvdrtype")?,
    })
}
