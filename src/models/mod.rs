//! Domain models for the clinical report tables
//!
//! Each report table is represented by one typed record. Records are created
//! by the ingestion layer and are read-only inputs to the cohort queries.

pub mod encounter;
pub mod medication;
pub mod observation;
pub mod patient;
pub mod provider;
pub mod risk;
pub mod types;

// Re-export commonly used types
pub use encounter::{Encounter, EncounterDiagnosis, EncounterProcedure};
pub use medication::MedicationRecord;
pub use observation::{LabObservation, VitalObservation, parse_a1c_value, parse_blood_pressure};
pub use patient::Patient;
pub use provider::Provider;
pub use risk::RiskScore;
pub use types::{EncounterId, PatientId, PatientStatus, ProviderId, TableKind};
