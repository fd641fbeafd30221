//! Medication list entries

use serde::{Deserialize, Serialize};

use super::types::PatientId;
use crate::algorithm::classify::{CategoryTable, MedicationClass};

/// One medication on a patient's medication list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRecord {
    /// Patient the medication belongs to
    pub patient_id: PatientId,
    /// Free-text medication name as it appears in the report
    pub name: String,
    /// Drug class assigned at import, `None` when unclassified
    pub class: Option<MedicationClass>,
}

impl MedicationRecord {
    /// Create a record and classify its name against `table`
    #[must_use]
    pub fn classified(
        patient_id: PatientId,
        name: impl Into<String>,
        table: &CategoryTable<MedicationClass>,
    ) -> Self {
        let name = name.into();
        let class = table.classify(&name);
        Self {
            patient_id,
            name,
            class,
        }
    }

    /// Whether the record was classified as `class`
    #[must_use]
    pub fn is_class(&self, class: MedicationClass) -> bool {
        self.class == Some(class)
    }
}
