//! Poorly-controlled diabetic cohort

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithm::classify::MedicationClass;
use crate::algorithm::temporal::latest_until;
use crate::collections::ClinicalDataset;
use crate::config::CohortConfig;
use crate::models::types::us_date;
use crate::models::{PatientId, ProviderId};

/// One member of the diabetic cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabeticRow {
    /// Enterprise identifier
    pub patient_id: PatientId,
    /// Age in years
    pub age: u32,
    /// Sex as recorded
    pub sex: String,
    /// Primary care provider
    pub primary_provider: ProviderId,
    /// Date of the latest A1C
    #[serde(with = "us_date")]
    pub latest_a1c_date: NaiveDate,
    /// Value of the latest A1C
    pub latest_a1c: f64,
    /// At least one medication classified as insulin
    pub on_insulin: bool,
    /// At least one medication classified as a GLP-1 agonist
    pub on_glp1: bool,
}

impl fmt::Display for DiabeticRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}, provider {}): A1C {:.1} on {}",
            self.patient_id,
            self.age,
            self.sex,
            self.primary_provider,
            self.latest_a1c,
            self.latest_a1c_date.format(us_date::FORMAT)
        )?;
        if self.on_insulin {
            write!(f, ", insulin")?;
        }
        if self.on_glp1 {
            write!(f, ", GLP1")?;
        }
        Ok(())
    }
}

/// Active patients whose latest A1C is at or above the configured threshold
///
/// Rows are sorted by A1C value, ascending, with ties broken by patient id.
#[must_use]
pub fn diabetic_cohort(dataset: &ClinicalDataset, config: &CohortConfig) -> Vec<DiabeticRow> {
    let a1c_by_patient = dataset.a1c_by_patient();
    let medications_by_patient = dataset.medications_by_patient();

    let mut rows: Vec<DiabeticRow> = dataset
        .active_patients()
        .filter_map(|patient| {
            let results = a1c_by_patient.get(&patient.id)?;
            let latest = latest_until(results.iter().copied(), config.as_of)?;
            if latest.value < config.a1c_threshold {
                return None;
            }

            let medications = medications_by_patient.get(&patient.id);
            let takes = |class: MedicationClass| {
                medications.is_some_and(|meds| meds.iter().any(|med| med.is_class(class)))
            };

            Some(DiabeticRow {
                patient_id: patient.id,
                age: patient.age,
                sex: patient.sex.clone(),
                primary_provider: patient.primary_provider,
                latest_a1c_date: latest.date,
                latest_a1c: latest.value,
                on_insulin: takes(MedicationClass::Insulin),
                on_glp1: takes(MedicationClass::Glp1),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.latest_a1c
            .total_cmp(&b.latest_a1c)
            .then(a.patient_id.cmp(&b.patient_id))
    });

    log::debug!("Diabetic cohort: {} patients", rows.len());
    rows
}
