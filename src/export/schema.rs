//! Arrow schemas of the exported reports

use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use arrow_schema::{DataType, Field, FieldRef, Schema};
use serde::Serialize;

use crate::algorithm::cohort::{ComplexityRow, DiabeticRow, HypertensiveRow};
use crate::error::Result;

/// A report row type with a fixed Arrow layout
pub trait ReportSchema: Serialize + Sized {
    /// Get the Arrow schema for this row type
    fn schema() -> Schema;

    /// Convert rows to a `RecordBatch` using the fixed schema
    ///
    /// An empty slice yields an empty batch that still carries every column.
    fn to_record_batch(rows: &[Self]) -> Result<RecordBatch> {
        let fields: Vec<FieldRef> = Self::schema().fields().iter().map(Arc::clone).collect();
        Ok(serde_arrow::to_record_batch(&fields, &rows)?)
    }
}

impl ReportSchema for DiabeticRow {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("patient_id", DataType::UInt64, false),
            Field::new("age", DataType::UInt32, false),
            Field::new("sex", DataType::Utf8, false),
            Field::new("primary_provider", DataType::UInt64, false),
            Field::new("latest_a1c_date", DataType::Utf8, false),
            Field::new("latest_a1c", DataType::Float64, false),
            Field::new("on_insulin", DataType::Boolean, false),
            Field::new("on_glp1", DataType::Boolean, false),
        ])
    }
}

impl ReportSchema for HypertensiveRow {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("patient_id", DataType::UInt64, false),
            Field::new("age", DataType::UInt32, false),
            Field::new("sex", DataType::Utf8, false),
            Field::new("primary_provider", DataType::UInt64, false),
            Field::new("latest_bp_date", DataType::Utf8, false),
            Field::new("systolic", DataType::UInt32, false),
            Field::new("diastolic", DataType::UInt32, false),
            Field::new("run_length", DataType::UInt64, false),
            Field::new("run_start", DataType::Utf8, false),
        ])
    }
}

impl ReportSchema for ComplexityRow {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("provider_id", DataType::UInt64, false),
            Field::new("provider_name", DataType::Utf8, true),
            Field::new("patient_count", DataType::UInt64, false),
            Field::new("avg_age", DataType::Float64, false),
            Field::new("avg_medication_count", DataType::Float64, false),
            Field::new("avg_risk_score", DataType::Float64, false),
            Field::new("fraction_diabetic", DataType::Float64, false),
        ])
    }
}
