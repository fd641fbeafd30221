//! Patient entity model

use serde::{Deserialize, Serialize};

use super::types::{PatientId, PatientStatus, ProviderId};

/// A patient row from the patient report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Enterprise identifier
    pub id: PatientId,
    /// Age in years
    pub age: u32,
    /// Sex as recorded in the report
    pub sex: String,
    /// Primary care provider
    pub primary_provider: ProviderId,
    /// Care status
    pub status: PatientStatus,
    /// Deceased flag as recorded (`Y`/`N`), when present
    pub deceased: Option<String>,
    /// Primary insurance package name
    pub primary_insurance_name: Option<String>,
    /// Primary insurance package type
    pub primary_insurance_type: Option<String>,
    /// Secondary insurance package name
    pub secondary_insurance_name: Option<String>,
    /// Secondary insurance package type
    pub secondary_insurance_type: Option<String>,
}

impl Patient {
    /// Create a patient with the required fields and no insurance details
    #[must_use]
    pub fn new(
        id: PatientId,
        age: u32,
        sex: impl Into<String>,
        primary_provider: ProviderId,
        status: PatientStatus,
    ) -> Self {
        Self {
            id,
            age,
            sex: sex.into(),
            primary_provider,
            status,
            deceased: None,
            primary_insurance_name: None,
            primary_insurance_type: None,
            secondary_insurance_name: None,
            secondary_insurance_type: None,
        }
    }

    /// Whether the patient is eligible for cohort membership
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
