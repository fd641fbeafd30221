//! Cohort identification algorithms
//!
//! - [`classify`]: ordered lexical classification of medication names and
//!   diagnosis codes
//! - [`temporal`]: most-recent observation selection and run-length detection
//! - [`cohort`]: the diabetic, hypertensive and complexity reports

pub mod classify;
pub mod cohort;
pub mod temporal;
