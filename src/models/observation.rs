//! Dated clinical observations
//!
//! Lab results (A1C) carry a single value; vital signs (blood pressure) carry a
//! systolic/diastolic pair parsed from the `"sys/dia"` text used in encounter
//! reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::PatientId;
use crate::algorithm::temporal::Dated;
use crate::algorithm::temporal::runs::PairedReading;

/// A dated lab result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabObservation {
    /// Patient the result belongs to
    pub patient_id: PatientId,
    /// Date the lab was drawn
    pub date: NaiveDate,
    /// Result value (percent for A1C)
    pub value: f64,
}

impl Dated for LabObservation {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A dated blood pressure reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalObservation {
    /// Patient the reading belongs to
    pub patient_id: PatientId,
    /// Date of the reading
    pub date: NaiveDate,
    /// Systolic pressure (mmHg)
    pub systolic: u32,
    /// Diastolic pressure (mmHg)
    pub diastolic: u32,
}

impl VitalObservation {
    /// The reading as a systolic/diastolic pair
    #[must_use]
    pub const fn paired(&self) -> PairedReading<u32> {
        PairedReading {
            date: self.date,
            first: self.systolic,
            second: self.diastolic,
        }
    }
}

impl Dated for VitalObservation {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Parse a blood pressure text such as `"142/91"` or `"BP 142/91 sitting"`
///
/// The first `digits/digits` pair in the text is used.
#[must_use]
pub fn parse_blood_pressure(text: &str) -> Option<(u32, u32)> {
    let bytes = text.as_bytes();
    for (slash, _) in text.match_indices('/') {
        let start = bytes[..slash]
            .iter()
            .rposition(|b| !b.is_ascii_digit())
            .map_or(0, |i| i + 1);
        let end = bytes[slash + 1..]
            .iter()
            .position(|b| !b.is_ascii_digit())
            .map_or(bytes.len(), |i| slash + 1 + i);

        if start == slash || end == slash + 1 {
            continue;
        }

        let systolic = text[start..slash].parse().ok()?;
        let diastolic = text[slash + 1..end].parse().ok()?;
        return Some((systolic, diastolic));
    }
    None
}

/// Parse an A1C value such as `"8.2"`, `"8.2%"` or `"8.2 %"`
#[must_use]
pub fn parse_a1c_value(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').map_or(trimmed, str::trim_end);
    number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}
