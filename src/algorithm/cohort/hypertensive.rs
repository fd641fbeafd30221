//! Poorly-controlled hypertensive cohort

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithm::temporal::runs::{PairThresholds, PairedReading, find_latest_qualifying_run};
use crate::collections::ClinicalDataset;
use crate::config::CohortConfig;
use crate::models::types::us_date;
use crate::models::{PatientId, ProviderId};

/// One member of the hypertensive cohort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypertensiveRow {
    /// Enterprise identifier
    pub patient_id: PatientId,
    /// Age in years
    pub age: u32,
    /// Sex as recorded
    pub sex: String,
    /// Primary care provider
    pub primary_provider: ProviderId,
    /// Most recent date of the elevated run
    #[serde(with = "us_date")]
    pub latest_bp_date: NaiveDate,
    /// Lowest systolic reading on that date
    pub systolic: u32,
    /// Lowest diastolic reading on that date
    pub diastolic: u32,
    /// Number of consecutive elevated dates
    pub run_length: usize,
    /// First date of the elevated run
    #[serde(with = "us_date")]
    pub run_start: NaiveDate,
}

impl fmt::Display for HypertensiveRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}, provider {}): {}/{} on {}, {} elevated dates since {}",
            self.patient_id,
            self.age,
            self.sex,
            self.primary_provider,
            self.systolic,
            self.diastolic,
            self.latest_bp_date.format(us_date::FORMAT),
            self.run_length,
            self.run_start.format(us_date::FORMAT)
        )
    }
}

/// Active patients whose most recent run of elevated readings is long enough
///
/// Rows are sorted by systolic then diastolic value, ascending, with ties
/// broken by patient id.
#[must_use]
pub fn hypertensive_cohort(dataset: &ClinicalDataset, config: &CohortConfig) -> Vec<HypertensiveRow> {
    let thresholds = PairThresholds::new(config.systolic_threshold, config.diastolic_threshold);
    let readings_by_patient = dataset.blood_pressure_by_patient();

    let mut rows: Vec<HypertensiveRow> = dataset
        .active_patients()
        .filter_map(|patient| {
            let readings: Vec<PairedReading<u32>> = readings_by_patient
                .get(&patient.id)?
                .iter()
                .map(|obs| obs.paired())
                .filter(|reading| config.as_of.is_none_or(|as_of| reading.date <= as_of))
                .collect();

            let run = find_latest_qualifying_run(&readings, &thresholds, config.min_run_length)?;

            if config.require_latest_reading {
                let last_reading = readings.iter().map(|reading| reading.date).max()?;
                if run.end() != last_reading {
                    return None;
                }
            }

            Some(HypertensiveRow {
                patient_id: patient.id,
                age: patient.age,
                sex: patient.sex.clone(),
                primary_provider: patient.primary_provider,
                latest_bp_date: run.end(),
                systolic: run.last.first,
                diastolic: run.last.second,
                run_length: run.length,
                run_start: run.start,
            })
        })
        .collect();

    rows.sort_by_key(|row| (row.systolic, row.diastolic, row.patient_id));

    log::debug!("Hypertensive cohort: {} patients", rows.len());
    rows
}
