//! Diagnosis groups for ICD-10 encounter codes

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CategoryTable, MatchMode};

/// Groups of related ICD-10 diagnoses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosisGroup {
    /// Diabetes mellitus (E08-E11, E13)
    Diabetes,
}

impl DiagnosisGroup {
    /// Get the report label for this group
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
        }
    }

    /// All groups in table order
    #[must_use]
    pub fn all_groups() -> Vec<Self> {
        vec![Self::Diabetes]
    }

    /// ICD-10 code prefixes belonging to this group
    #[must_use]
    pub const fn code_prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Diabetes => &["E08", "E09", "E10", "E11", "E13"],
        }
    }
}

impl fmt::Display for DiagnosisGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Build the default diagnosis table (prefix matching on the ICD-10 code)
#[must_use]
pub fn diagnosis_table() -> CategoryTable<DiagnosisGroup> {
    DiagnosisGroup::all_groups()
        .into_iter()
        .fold(CategoryTable::new(MatchMode::Prefix), |table, group| {
            table.with_category(group, group.code_prefixes())
        })
}
