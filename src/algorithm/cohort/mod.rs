//! Cohort reports over a dataset snapshot
//!
//! Each report is a pure function of a [`ClinicalDataset`] and the cohort
//! configuration. Patients lacking a fact a report requires are left out of
//! that report; facts that only set a flag (medication classes, diagnosis
//! groups) default to `false` when absent.
//!
//! [`ClinicalDataset`]: crate::collections::ClinicalDataset

pub mod complexity;
pub mod diabetic;
pub mod hypertensive;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use complexity::{ComplexityRow, complexity_statistics};
pub use diabetic::{DiabeticRow, diabetic_cohort};
pub use hypertensive::{HypertensiveRow, hypertensive_cohort};

/// The reports the engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Active patients whose latest A1C is at or above the threshold
    Diabetic,
    /// Active patients with a current run of elevated blood pressure dates
    Hypertensive,
    /// Per-provider patient complexity averages
    Complexity,
}

impl ReportKind {
    /// All reports in the order they are produced
    pub const ALL: [Self; 3] = [Self::Diabetic, Self::Hypertensive, Self::Complexity];

    /// Prefix of the exported file name
    #[must_use]
    pub const fn file_prefix(self) -> &'static str {
        match self {
            Self::Diabetic => "poorly_cont_dm_output",
            Self::Hypertensive => "poorly_cont_htn_output",
            Self::Complexity => "patient_complex_output",
        }
    }

    /// Report title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Diabetic => "Poorly Controlled Diabetic Query",
            Self::Hypertensive => "Poorly Controlled Hypertensive Query",
            Self::Complexity => "Patient Complexity Query",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diabetic" | "dm" => Ok(Self::Diabetic),
            "hypertensive" | "htn" => Ok(Self::Hypertensive),
            "complexity" | "complex" => Ok(Self::Complexity),
            other => Err(format!("unknown report: {other}")),
        }
    }
}
