//! Patient complexity statistics per primary provider

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::classify::DiagnosisGroup;
use crate::collections::ClinicalDataset;
use crate::models::ProviderId;

/// Averages over one provider's active panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityRow {
    /// Primary care provider
    pub provider_id: ProviderId,
    /// Provider short name, when the provider table knows the id
    pub provider_name: Option<String>,
    /// Patients counted
    pub patient_count: usize,
    /// Mean age in years
    pub avg_age: f64,
    /// Mean number of medication records
    pub avg_medication_count: f64,
    /// Mean HCC RAF score
    pub avg_risk_score: f64,
    /// Share of patients with a diabetes diagnosis (0.0 to 1.0)
    pub fraction_diabetic: f64,
}

impl fmt::Display for ComplexityRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} patients, age {:.1}, meds {:.1}, RAF {:.3}, diabetic {:.1}%",
            self.provider_name.as_deref().unwrap_or("unknown"),
            self.provider_id,
            self.patient_count,
            self.avg_age,
            self.avg_medication_count,
            self.avg_risk_score,
            self.fraction_diabetic * 100.0
        )
    }
}

#[derive(Debug, Default)]
struct PanelTotals {
    patients: usize,
    age: f64,
    medications: f64,
    risk: f64,
    diabetic: usize,
}

/// Complexity averages for every primary provider, ordered by provider id
///
/// A patient is counted when active, with at least one medication record and
/// a risk score. Diabetes status comes from encounter diagnoses and is `false`
/// when the patient has none.
#[must_use]
pub fn complexity_statistics(dataset: &ClinicalDataset) -> Vec<ComplexityRow> {
    let medications = dataset.medications_by_patient();
    let risk_scores = dataset.risk_score_by_patient();
    let diabetic = dataset.patients_with_diagnosis(DiagnosisGroup::Diabetes);
    let providers = dataset.providers_by_id();

    let mut panels: BTreeMap<ProviderId, PanelTotals> = BTreeMap::new();
    for patient in dataset.active_patients() {
        let Some(medication_count) = medications.get(&patient.id).map(Vec::len) else {
            continue;
        };
        let Some(risk) = risk_scores.get(&patient.id) else {
            continue;
        };

        let totals = panels.entry(patient.primary_provider).or_default();
        totals.patients += 1;
        totals.age += f64::from(patient.age);
        totals.medications += medication_count as f64;
        totals.risk += risk;
        if diabetic.contains(&patient.id) {
            totals.diabetic += 1;
        }
    }

    panels
        .into_iter()
        .map(|(provider_id, totals)| {
            let n = totals.patients as f64;
            ComplexityRow {
                provider_id,
                provider_name: providers.get(&provider_id).map(|p| p.name.clone()),
                patient_count: totals.patients,
                avg_age: totals.age / n,
                avg_medication_count: totals.medications / n,
                avg_risk_score: totals.risk / n,
                fraction_diabetic: totals.diabetic as f64 / n,
            }
        })
        .collect()
}
