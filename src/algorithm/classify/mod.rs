//! Lexical classification of free-text clinical terms
//!
//! A [`CategoryTable`] is an ordered list of categories, each with the
//! alternative surface forms (generic names, brand names, code prefixes) that
//! identify it. Classification walks the categories in declared order and
//! returns the first one with a matching alternative, so the declaration order
//! is the tie-break rule for terms that mention more than one category
//! (combination products, for example).

pub mod diagnosis;
pub mod medication;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use diagnosis::{DiagnosisGroup, diagnosis_table};
pub use medication::{MedicationClass, medication_table};

/// How an alternative is compared against the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The alternative may occur anywhere in the text (medication names)
    Substring,
    /// The text must start with the alternative (ICD-10 code prefixes)
    Prefix,
}

impl MatchMode {
    fn matches(self, normalized_text: &str, normalized_term: &str) -> bool {
        match self {
            Self::Substring => normalized_text.contains(normalized_term),
            Self::Prefix => normalized_text.starts_with(normalized_term),
        }
    }
}

/// Ordered mapping from category to its alternative surface forms
#[derive(Debug, Clone)]
pub struct CategoryTable<C> {
    mode: MatchMode,
    entries: Vec<(C, Vec<String>)>,
}

impl<C: Copy + PartialEq> CategoryTable<C> {
    /// Create an empty table using the given match mode
    #[must_use]
    pub const fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    /// Append a category and its alternatives to the end of the table
    ///
    /// Alternatives are trimmed and lowercased. Blank alternatives are dropped
    /// since they would match every input. Adding a category that is already
    /// declared extends its alternatives without changing its position.
    #[must_use]
    pub fn with_category<S: AsRef<str>>(mut self, category: C, alternatives: &[S]) -> Self {
        let terms = alternatives
            .iter()
            .map(|term| normalize(term.as_ref()))
            .filter(|term| !term.is_empty());

        if let Some((_, existing)) = self.entries.iter_mut().find(|(c, _)| *c == category) {
            existing.extend(terms);
        } else {
            self.entries.push((category, terms.collect()));
        }
        self
    }

    /// Classify a free-text term
    ///
    /// Returns the earliest-declared category with an alternative matching
    /// `text`, or `None` when nothing matches. Every category is checked
    /// before giving up.
    #[must_use]
    pub fn classify(&self, text: &str) -> Option<C> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|(_, terms)| terms.iter().any(|term| self.mode.matches(&normalized, term)))
            .map(|(category, _)| *category)
    }

    /// Classify a term and keep the raw text alongside the result
    #[must_use]
    pub fn classify_term(&self, text: &str) -> ClassifiedTerm<C> {
        ClassifiedTerm {
            text: text.to_string(),
            category: self.classify(text),
        }
    }

    /// Categories in declaration (tie-break) order
    pub fn categories(&self) -> impl Iterator<Item = C> + '_ {
        self.entries.iter().map(|(category, _)| *category)
    }

    /// Normalized alternatives declared for a category
    #[must_use]
    pub fn alternatives(&self, category: C) -> &[String] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(&[][..], |(_, terms)| terms.as_slice())
    }

    /// The match mode used by this table
    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Number of categories in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table declares no categories
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A raw term together with the category it was assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedTerm<C> {
    /// The text as it appeared in the report
    pub text: String,
    /// Assigned category, `None` when unclassified
    pub category: Option<C>,
}

impl<C: fmt::Display> fmt::Display for ClassifiedTerm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => write!(f, "{} [{category}]", self.text),
            None => write!(f, "{} [unclassified]", self.text),
        }
    }
}

/// The two classification tables used during ingestion
#[derive(Debug, Clone)]
pub struct Classifiers {
    /// Medication name to drug class
    pub medications: CategoryTable<MedicationClass>,
    /// ICD-10 code to diagnosis group
    pub diagnoses: CategoryTable<DiagnosisGroup>,
}

impl Default for Classifiers {
    fn default() -> Self {
        Self {
            medications: medication_table(),
            diagnoses: diagnosis_table(),
        }
    }
}
