//! Risk adjustment scores

use serde::{Deserialize, Serialize};

use super::types::PatientId;

/// An HCC RAF score row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Patient the score belongs to
    pub patient_id: PatientId,
    /// Risk adjustment factor
    pub score: f64,
}
