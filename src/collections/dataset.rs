//! Dataset snapshot with whole-table replacement and per-patient indexes

use std::fmt;
use std::hash::Hash;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::algorithm::classify::DiagnosisGroup;
use crate::models::{
    Encounter, EncounterDiagnosis, EncounterId, EncounterProcedure, LabObservation,
    MedicationRecord, Patient, PatientId, Provider, ProviderId, RiskScore, TableKind,
    VitalObservation,
};

/// The records of one report table
#[derive(Debug, Clone, PartialEq)]
pub enum TableData {
    /// Patient report rows
    Patients(Vec<Patient>),
    /// Medication report rows
    Medications(Vec<MedicationRecord>),
    /// A1C report rows
    A1c(Vec<LabObservation>),
    /// Blood pressure report rows
    BloodPressure(Vec<VitalObservation>),
    /// RAF score report rows
    RiskScores(Vec<RiskScore>),
    /// Encounter report rows
    Encounters(Vec<Encounter>),
    /// Encounter diagnosis report rows
    EncounterDiagnoses(Vec<EncounterDiagnosis>),
    /// Encounter procedure report rows
    EncounterProcedures(Vec<EncounterProcedure>),
    /// Provider report rows
    Providers(Vec<Provider>),
}

impl TableData {
    /// The table these records belong to
    #[must_use]
    pub const fn kind(&self) -> TableKind {
        match self {
            Self::Patients(_) => TableKind::Patients,
            Self::Medications(_) => TableKind::Medications,
            Self::A1c(_) => TableKind::A1c,
            Self::BloodPressure(_) => TableKind::BloodPressure,
            Self::RiskScores(_) => TableKind::RiskScores,
            Self::Encounters(_) => TableKind::Encounters,
            Self::EncounterDiagnoses(_) => TableKind::EncounterDiagnoses,
            Self::EncounterProcedures(_) => TableKind::EncounterProcedures,
            Self::Providers(_) => TableKind::Providers,
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Patients(rows) => rows.len(),
            Self::Medications(rows) => rows.len(),
            Self::A1c(rows) => rows.len(),
            Self::BloodPressure(rows) => rows.len(),
            Self::RiskScores(rows) => rows.len(),
            Self::Encounters(rows) => rows.len(),
            Self::EncounterDiagnoses(rows) => rows.len(),
            Self::EncounterProcedures(rows) => rows.len(),
            Self::Providers(rows) => rows.len(),
        }
    }

    /// Whether the table has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A table produced by the ingestion layer, ready to replace its counterpart
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    /// Parsed records
    pub data: TableData,
    /// Rows dropped because of missing or malformed values
    pub skipped: usize,
    /// File the records were read from
    pub source: Option<PathBuf>,
}

/// Metadata recorded each time a table is replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableImport {
    /// Replaced table
    pub table: TableKind,
    /// Records stored
    pub rows: usize,
    /// Rows dropped during ingestion (including duplicate keys)
    pub skipped: usize,
    /// When the replacement happened
    pub imported_at: DateTime<Local>,
}

/// Row count and last import of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    /// Table described
    pub table: TableKind,
    /// Records currently stored
    pub rows: usize,
    /// Most recent import, if the table was ever imported
    pub last_import: Option<TableImport>,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<22} {:>8} rows", self.table.display_name(), self.rows)?;
        match &self.last_import {
            Some(import) => write!(
                f,
                "  (imported {}, {} skipped)",
                import.imported_at.format("%m/%d/%y %H:%M:%S"),
                import.skipped
            ),
            None => write!(f, "  (never imported)"),
        }
    }
}

/// Snapshot of every report table
#[derive(Debug, Clone, Default)]
pub struct ClinicalDataset {
    patients: Vec<Patient>,
    medications: Vec<MedicationRecord>,
    a1c: Vec<LabObservation>,
    blood_pressure: Vec<VitalObservation>,
    risk_scores: Vec<RiskScore>,
    encounters: Vec<Encounter>,
    encounter_diagnoses: Vec<EncounterDiagnosis>,
    encounter_procedures: Vec<EncounterProcedure>,
    providers: Vec<Provider>,
    imports: Vec<TableImport>,
}

/// Keep the last row for every key, preserving the order of the kept rows
fn keep_last_by_key<T, K, F>(rows: Vec<T>, key: F) -> (Vec<T>, usize)
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let last_index: FxHashMap<K, usize> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (key(row), index))
        .collect();

    let total = rows.len();
    let kept: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter(|(index, row)| last_index.get(&key(row)) == Some(index))
        .map(|(_, row)| row)
        .collect();

    let duplicates = total - kept.len();
    (kept, duplicates)
}

impl ClinicalDataset {
    /// Create an empty dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record_import(&mut self, table: TableKind, rows: usize, skipped: usize) {
        log::debug!("Replaced {table} table: {rows} rows, {skipped} skipped");
        self.imports.push(TableImport {
            table,
            rows,
            skipped,
            imported_at: Local::now(),
        });
    }

    /// Replace the patient table
    ///
    /// Patients are keyed by enterprise id; when an id appears more than once
    /// the last row wins and the others are counted as skipped.
    pub fn replace_patients(&mut self, patients: Vec<Patient>, skipped: usize) {
        let (patients, duplicates) = keep_last_by_key(patients, |p| p.id);
        if duplicates > 0 {
            log::warn!("Dropped {duplicates} duplicate patient rows");
        }
        self.record_import(TableKind::Patients, patients.len(), skipped + duplicates);
        self.patients = patients;
    }

    /// Replace the medication table
    pub fn replace_medications(&mut self, medications: Vec<MedicationRecord>, skipped: usize) {
        self.record_import(TableKind::Medications, medications.len(), skipped);
        self.medications = medications;
    }

    /// Replace the A1C table
    pub fn replace_a1c(&mut self, observations: Vec<LabObservation>, skipped: usize) {
        self.record_import(TableKind::A1c, observations.len(), skipped);
        self.a1c = observations;
    }

    /// Replace the blood pressure table
    pub fn replace_blood_pressure(&mut self, observations: Vec<VitalObservation>, skipped: usize) {
        self.record_import(TableKind::BloodPressure, observations.len(), skipped);
        self.blood_pressure = observations;
    }

    /// Replace the risk score table
    pub fn replace_risk_scores(&mut self, scores: Vec<RiskScore>, skipped: usize) {
        self.record_import(TableKind::RiskScores, scores.len(), skipped);
        self.risk_scores = scores;
    }

    /// Replace the encounter table
    ///
    /// Encounters are keyed by encounter id; the last row for an id wins.
    pub fn replace_encounters(&mut self, encounters: Vec<Encounter>, skipped: usize) {
        let (encounters, duplicates) = keep_last_by_key(encounters, |e| e.id);
        if duplicates > 0 {
            log::warn!("Dropped {duplicates} duplicate encounter rows");
        }
        self.record_import(TableKind::Encounters, encounters.len(), skipped + duplicates);
        self.encounters = encounters;
    }

    /// Replace the encounter diagnosis table
    pub fn replace_encounter_diagnoses(&mut self, diagnoses: Vec<EncounterDiagnosis>, skipped: usize) {
        self.record_import(TableKind::EncounterDiagnoses, diagnoses.len(), skipped);
        self.encounter_diagnoses = diagnoses;
    }

    /// Replace the encounter procedure table
    pub fn replace_encounter_procedures(
        &mut self,
        procedures: Vec<EncounterProcedure>,
        skipped: usize,
    ) {
        self.record_import(TableKind::EncounterProcedures, procedures.len(), skipped);
        self.encounter_procedures = procedures;
    }

    /// Replace the provider table
    ///
    /// Providers are keyed by provider id; the last row for an id wins.
    pub fn replace_providers(&mut self, providers: Vec<Provider>, skipped: usize) {
        let (providers, duplicates) = keep_last_by_key(providers, |p| p.id);
        if duplicates > 0 {
            log::warn!("Dropped {duplicates} duplicate provider rows");
        }
        self.record_import(TableKind::Providers, providers.len(), skipped + duplicates);
        self.providers = providers;
    }

    /// Replace whichever table `loaded` holds
    pub fn apply(&mut self, loaded: LoadedTable) {
        let skipped = loaded.skipped;
        match loaded.data {
            TableData::Patients(rows) => self.replace_patients(rows, skipped),
            TableData::Medications(rows) => self.replace_medications(rows, skipped),
            TableData::A1c(rows) => self.replace_a1c(rows, skipped),
            TableData::BloodPressure(rows) => self.replace_blood_pressure(rows, skipped),
            TableData::RiskScores(rows) => self.replace_risk_scores(rows, skipped),
            TableData::Encounters(rows) => self.replace_encounters(rows, skipped),
            TableData::EncounterDiagnoses(rows) => self.replace_encounter_diagnoses(rows, skipped),
            TableData::EncounterProcedures(rows) => {
                self.replace_encounter_procedures(rows, skipped);
            }
            TableData::Providers(rows) => self.replace_providers(rows, skipped),
        }
    }

    /// Patient table
    #[must_use]
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Patients eligible for cohort membership
    pub fn active_patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter().filter(|p| p.is_active())
    }

    /// Medication table
    #[must_use]
    pub fn medications(&self) -> &[MedicationRecord] {
        &self.medications
    }

    /// A1C table
    #[must_use]
    pub fn a1c(&self) -> &[LabObservation] {
        &self.a1c
    }

    /// Blood pressure table
    #[must_use]
    pub fn blood_pressure(&self) -> &[VitalObservation] {
        &self.blood_pressure
    }

    /// Risk score table
    #[must_use]
    pub fn risk_scores(&self) -> &[RiskScore] {
        &self.risk_scores
    }

    /// Encounter table
    #[must_use]
    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    /// Encounter diagnosis table
    #[must_use]
    pub fn encounter_diagnoses(&self) -> &[EncounterDiagnosis] {
        &self.encounter_diagnoses
    }

    /// Encounter procedure table
    #[must_use]
    pub fn encounter_procedures(&self) -> &[EncounterProcedure] {
        &self.encounter_procedures
    }

    /// Provider table
    #[must_use]
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Number of records currently stored for `table`
    #[must_use]
    pub fn row_count(&self, table: TableKind) -> usize {
        match table {
            TableKind::Patients => self.patients.len(),
            TableKind::Medications => self.medications.len(),
            TableKind::A1c => self.a1c.len(),
            TableKind::BloodPressure => self.blood_pressure.len(),
            TableKind::RiskScores => self.risk_scores.len(),
            TableKind::Encounters => self.encounters.len(),
            TableKind::EncounterDiagnoses => self.encounter_diagnoses.len(),
            TableKind::EncounterProcedures => self.encounter_procedures.len(),
            TableKind::Providers => self.providers.len(),
        }
    }

    /// Most recent import of `table`
    #[must_use]
    pub fn latest_import(&self, table: TableKind) -> Option<&TableImport> {
        self.imports.iter().rev().find(|import| import.table == table)
    }

    /// Every import in the order they happened
    #[must_use]
    pub fn imports(&self) -> &[TableImport] {
        &self.imports
    }

    /// Row count and last import for every table
    #[must_use]
    pub fn summary(&self) -> Vec<TableSummary> {
        TableKind::ALL
            .into_iter()
            .map(|table| TableSummary {
                table,
                rows: self.row_count(table),
                last_import: self.latest_import(table).cloned(),
            })
            .collect()
    }

    /// A1C results per patient, in input order
    #[must_use]
    pub fn a1c_by_patient(&self) -> FxHashMap<PatientId, Vec<&LabObservation>> {
        let mut grouped: FxHashMap<PatientId, Vec<&LabObservation>> = FxHashMap::default();
        for obs in &self.a1c {
            grouped.entry(obs.patient_id).or_default().push(obs);
        }
        grouped
    }

    /// Blood pressure readings per patient, in input order
    #[must_use]
    pub fn blood_pressure_by_patient(&self) -> FxHashMap<PatientId, Vec<&VitalObservation>> {
        let mut grouped: FxHashMap<PatientId, Vec<&VitalObservation>> = FxHashMap::default();
        for obs in &self.blood_pressure {
            grouped.entry(obs.patient_id).or_default().push(obs);
        }
        grouped
    }

    /// Medication records per patient, in input order
    #[must_use]
    pub fn medications_by_patient(&self) -> FxHashMap<PatientId, Vec<&MedicationRecord>> {
        let mut grouped: FxHashMap<PatientId, Vec<&MedicationRecord>> = FxHashMap::default();
        for med in &self.medications {
            grouped.entry(med.patient_id).or_default().push(med);
        }
        grouped
    }

    /// One risk score per patient; the last imported row wins
    #[must_use]
    pub fn risk_score_by_patient(&self) -> FxHashMap<PatientId, f64> {
        self.risk_scores
            .iter()
            .map(|score| (score.patient_id, score.score))
            .collect()
    }

    /// Patients with at least one encounter diagnosis in `group`
    ///
    /// Diagnoses reach patients through their encounter; diagnoses whose
    /// encounter is unknown are ignored.
    #[must_use]
    pub fn patients_with_diagnosis(&self, group: DiagnosisGroup) -> FxHashSet<PatientId> {
        let encounter_patient: FxHashMap<EncounterId, PatientId> = self
            .encounters
            .iter()
            .map(|enc| (enc.id, enc.patient_id))
            .collect();

        self.encounter_diagnoses
            .iter()
            .filter(|dx| dx.group == Some(group))
            .filter_map(|dx| encounter_patient.get(&dx.encounter_id).copied())
            .collect()
    }

    /// Providers indexed by id
    #[must_use]
    pub fn providers_by_id(&self) -> FxHashMap<ProviderId, &Provider> {
        self.providers.iter().map(|p| (p.id, p)).collect()
    }
}
