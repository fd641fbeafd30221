//! Column resolution and per-row text access
//!
//! Report headers vary in case and surrounding whitespace between exports, so
//! columns are matched on their trimmed, lowercased names. Every value is
//! handled as text; Parquet columns of other types are cast to text first.

use arrow::array::{Array, AsArray, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::config::DateFormatConfig;
use crate::error::{CohortError, Result};
use crate::ingest::date_utils::parse_date_string;

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Positions of the columns a table reads, keyed by their canonical name
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: FxHashMap<&'static str, usize>,
}

impl ColumnMap {
    /// Locate `required` and `optional` columns in `schema`
    ///
    /// Fails with [`CohortError::MissingColumns`] naming every required column
    /// that is absent together with the columns the file does have.
    pub fn resolve(
        table: &str,
        schema: &Schema,
        required: &[&'static str],
        optional: &[&'static str],
    ) -> Result<Self> {
        let by_name: FxHashMap<String, usize> = schema
            .fields()
            .iter()
            .enumerate()
            .rev() // first occurrence wins for duplicated headers
            .map(|(index, field)| (normalize_name(field.name()), index))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|name| !by_name.contains_key(&normalize_name(name)))
            .map(|name| (*name).to_string())
            .collect();

        if !missing.is_empty() {
            return Err(CohortError::MissingColumns {
                table: table.to_string(),
                missing,
                found: schema.fields().iter().map(|f| f.name().clone()).collect(),
            });
        }

        let indices = required
            .iter()
            .chain(optional)
            .filter_map(|name| by_name.get(&normalize_name(name)).map(|index| (*name, *index)))
            .collect();

        Ok(Self { indices })
    }

    /// Whether the file has the column
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }
}

/// The resolved columns of one record batch as text arrays
#[derive(Debug)]
pub struct BatchText {
    columns: FxHashMap<&'static str, StringArray>,
    num_rows: usize,
}

impl BatchText {
    /// Cast the resolved columns of `batch` to text
    pub fn new(batch: &RecordBatch, columns: &ColumnMap) -> Result<Self> {
        let mut text = FxHashMap::default();
        for (name, index) in &columns.indices {
            let column = batch.column(*index);
            let strings = if column.data_type() == &DataType::Utf8 {
                column.as_string::<i32>().clone()
            } else {
                cast(column, &DataType::Utf8)?.as_string::<i32>().clone()
            };
            text.insert(*name, strings);
        }

        Ok(Self {
            columns: text,
            num_rows: batch.num_rows(),
        })
    }

    /// Number of rows in the batch
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// A view of one row
    #[must_use]
    pub const fn row(&self, index: usize) -> RowText<'_> {
        RowText { batch: self, index }
    }
}

/// Typed accessors over one row of a [`BatchText`]
///
/// Every accessor returns `None` for null, blank or unparseable values.
#[derive(Debug, Clone, Copy)]
pub struct RowText<'a> {
    batch: &'a BatchText,
    index: usize,
}

impl<'a> RowText<'a> {
    /// Trimmed, non-blank text of a column
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&'a str> {
        let column = self.batch.columns.get(name)?;
        if column.is_null(self.index) {
            return None;
        }
        let value = column.value(self.index).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Owned text of a column
    #[must_use]
    pub fn string(&self, name: &str) -> Option<String> {
        self.text(name).map(str::to_string)
    }

    /// Non-negative whole number; `"1234.0"` is accepted as exported by
    /// spreadsheet tools
    #[must_use]
    pub fn whole_number(&self, name: &str) -> Option<u64> {
        parse_whole_number(self.text(name)?)
    }

    /// Age in years
    #[must_use]
    pub fn age(&self, name: &str) -> Option<u32> {
        self.whole_number(name).and_then(|n| u32::try_from(n).ok())
    }

    /// Finite decimal number
    #[must_use]
    pub fn decimal(&self, name: &str) -> Option<f64> {
        self.text(name)?
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    /// Calendar date
    #[must_use]
    pub fn date(&self, name: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
        parse_date_string(self.text(name)?, config)
    }
}

/// Parse an identifier or count written as an integer or an integral decimal
#[must_use]
pub fn parse_whole_number(text: &str) -> Option<u64> {
    if let Ok(value) = text.parse::<u64>() {
        return Some(value);
    }

    let value = text.parse::<f64>().ok()?;
    // Integral values beyond 2^53 are not exact in f64 and are rejected
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < 9_007_199_254_740_992.0 {
        Some(value as u64)
    } else {
        None
    }
}
