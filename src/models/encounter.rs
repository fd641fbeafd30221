//! Encounters and the codes recorded at them

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{EncounterId, PatientId, ProviderId};
use crate::algorithm::classify::{CategoryTable, DiagnosisGroup};

/// A clinical encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Encounter identifier
    pub id: EncounterId,
    /// Patient seen
    pub patient_id: PatientId,
    /// Rendering provider
    pub provider_id: ProviderId,
    /// Date of service
    pub date: NaiveDate,
    /// Appointment type
    pub appointment_type: String,
}

/// An ICD-10 code recorded at an encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterDiagnosis {
    /// Encounter the code was recorded at
    pub encounter_id: EncounterId,
    /// ICD-10 code as it appears in the report
    pub icd10_code: String,
    /// Diagnosis group assigned at import, `None` when unclassified
    pub group: Option<DiagnosisGroup>,
}

impl EncounterDiagnosis {
    /// Create a record and classify its code against `table`
    #[must_use]
    pub fn classified(
        encounter_id: EncounterId,
        icd10_code: impl Into<String>,
        table: &CategoryTable<DiagnosisGroup>,
    ) -> Self {
        let icd10_code = icd10_code.into();
        let group = table.classify(&icd10_code);
        Self {
            encounter_id,
            icd10_code,
            group,
        }
    }
}

/// A procedure code recorded at an encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterProcedure {
    /// Encounter the procedure was performed at
    pub encounter_id: EncounterId,
    /// Procedure (CPT/HCPCS) code
    pub procedure_code: String,
}
