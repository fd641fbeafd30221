//! Run-length detection over paired dated measurements
//!
//! A series of paired readings (systolic/diastolic blood pressure, for example)
//! is first collapsed to one reading per date, taking the minimum of each
//! metric independently. A date is flagged when either metric is strictly
//! above its threshold, and maximal sequences of consecutive flagged dates
//! form runs. Any unflagged date breaks a run.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::Dated;

/// Two metrics measured together on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedReading<T> {
    /// Date of the reading
    pub date: NaiveDate,
    /// First metric (systolic)
    pub first: T,
    /// Second metric (diastolic)
    pub second: T,
}

impl<T> Dated for PairedReading<T> {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Upper limits for the two metrics of a [`PairedReading`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairThresholds {
    /// Limit for the first metric
    pub first: f64,
    /// Limit for the second metric
    pub second: f64,
}

impl PairThresholds {
    /// Create thresholds for the two metrics
    #[must_use]
    pub const fn new(first: f64, second: f64) -> Self {
        Self { first, second }
    }

    /// A reading is flagged when either metric is strictly above its limit
    #[must_use]
    pub fn is_exceeded_by<T: Copy + Into<f64>>(&self, reading: &PairedReading<T>) -> bool {
        reading.first.into() > self.first || reading.second.into() > self.second
    }
}

/// A maximal sequence of consecutive flagged dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run<T> {
    /// First date of the run
    pub start: NaiveDate,
    /// Number of dates in the run
    pub length: usize,
    /// Collapsed reading on the most recent date of the run
    pub last: PairedReading<T>,
}

impl<T> Run<T> {
    /// Most recent date of the run
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.last.date
    }
}

fn min_of<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

/// Collapse readings to one per date, in chronological order
///
/// Each metric is reduced to its minimum independently, so the collapsed
/// reading may combine values from different measurements on the same date.
pub fn collapse_by_date<'a, T, I>(readings: I) -> Vec<PairedReading<T>>
where
    T: Copy + PartialOrd + 'a,
    I: IntoIterator<Item = &'a PairedReading<T>>,
{
    let mut by_date: BTreeMap<NaiveDate, (T, T)> = BTreeMap::new();
    for reading in readings {
        by_date
            .entry(reading.date)
            .and_modify(|(first, second)| {
                *first = min_of(*first, reading.first);
                *second = min_of(*second, reading.second);
            })
            .or_insert((reading.first, reading.second));
    }

    by_date
        .into_iter()
        .map(|(date, (first, second))| PairedReading {
            date,
            first,
            second,
        })
        .collect()
}

/// All maximal runs of flagged dates, oldest first
pub fn find_runs<'a, T, I>(readings: I, thresholds: &PairThresholds) -> Vec<Run<T>>
where
    T: Copy + PartialOrd + Into<f64> + 'a,
    I: IntoIterator<Item = &'a PairedReading<T>>,
{
    let collapsed = collapse_by_date(readings);

    collapsed
        .iter()
        .chunk_by(|reading| thresholds.is_exceeded_by(reading))
        .into_iter()
        .filter(|(flagged, _)| *flagged)
        .filter_map(|(_, group)| {
            let members: Vec<&PairedReading<T>> = group.collect();
            let first = members.first()?;
            let last = members.last()?;
            Some(Run {
                start: first.date,
                length: members.len(),
                last: **last,
            })
        })
        .collect()
}

/// The run holding the most recent flagged date, if it is long enough
///
/// Only the most recent run is considered: an older run that met the minimum
/// length does not qualify the series once a later flagged date starts a new,
/// shorter run.
pub fn find_latest_qualifying_run<'a, T, I>(
    readings: I,
    thresholds: &PairThresholds,
    min_run_length: usize,
) -> Option<Run<T>>
where
    T: Copy + PartialOrd + Into<f64> + 'a,
    I: IntoIterator<Item = &'a PairedReading<T>>,
{
    find_runs(readings, thresholds)
        .pop()
        .filter(|run| run.length >= min_run_length)
}
