//! Common domain type definitions
//!
//! Identifier aliases, the patient status flag and the list of report tables
//! shared by the models, the dataset snapshot and the ingestion layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Enterprise identifier of a patient
pub type PatientId = u64;

/// Identifier of a provider
pub type ProviderId = u64;

/// Identifier of a clinical encounter
pub type EncounterId = u64;

/// Care status of a patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    /// Currently under care (`a`)
    Active,
    /// Any other status code
    Inactive,
}

impl PatientStatus {
    /// Whether the patient is eligible for cohort membership
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<&str> for PatientStatus {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("a") {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// The report tables that make up a dataset snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Patient demographics and status
    Patients,
    /// Medication list entries
    Medications,
    /// Hemoglobin A1C lab results
    A1c,
    /// Encounter blood pressure readings
    BloodPressure,
    /// HCC RAF risk scores
    RiskScores,
    /// Clinical encounters
    Encounters,
    /// ICD-10 codes recorded at encounters
    EncounterDiagnoses,
    /// Procedure codes recorded at encounters
    EncounterProcedures,
    /// Provider directory
    Providers,
}

impl TableKind {
    /// All tables, in the order they are reported
    pub const ALL: [Self; 9] = [
        Self::Providers,
        Self::Patients,
        Self::Medications,
        Self::A1c,
        Self::BloodPressure,
        Self::RiskScores,
        Self::Encounters,
        Self::EncounterDiagnoses,
        Self::EncounterProcedures,
    ];

    /// File name (without extension) the table is loaded from
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Patients => "patients",
            Self::Medications => "medications",
            Self::A1c => "a1c",
            Self::BloodPressure => "blood_pressure",
            Self::RiskScores => "raf_scores",
            Self::Encounters => "encounters",
            Self::EncounterDiagnoses => "encounter_diagnoses",
            Self::EncounterProcedures => "encounter_procedures",
            Self::Providers => "providers",
        }
    }

    /// Human readable table name
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Patients => "Patient",
            Self::Medications => "Medication",
            Self::A1c => "A1C",
            Self::BloodPressure => "Blood Pressure",
            Self::RiskScores => "RAF Score",
            Self::Encounters => "Encounter",
            Self::EncounterDiagnoses => "Encounter Diagnoses",
            Self::EncounterProcedures => "Encounter Procedure",
            Self::Providers => "Provider",
        }
    }

    /// Look up a table by its file stem
    #[must_use]
    pub fn from_file_stem(stem: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.file_stem().eq_ignore_ascii_case(stem))
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Serialize dates as `MM/DD/YYYY` text in exported reports
pub mod us_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Date format used in exported reports
    pub const FORMAT: &str = "%m/%d/%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&text, FORMAT).map_err(serde::de::Error::custom)
    }
}
