//! Selection of dated observations
//!
//! [`latest`] picks the most recent observation from an unordered series.
//! When several observations share the most recent date, the one that comes
//! last in input order is returned, which makes repeated runs over the same
//! import deterministic.

pub mod runs;

use chrono::NaiveDate;

/// An observation with a calendar date
pub trait Dated {
    /// Date of the observation
    fn date(&self) -> NaiveDate;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }
}

/// Most recent observation, `None` for an empty series
///
/// Ties on the most recent date resolve to the last one in input order.
pub fn latest<I>(observations: I) -> Option<I::Item>
where
    I: IntoIterator,
    I::Item: Dated,
{
    // max_by_key returns the last of several equal maxima
    observations.into_iter().max_by_key(|obs| obs.date())
}

/// Most recent observation dated on or before `as_of`
pub fn latest_as_of<I>(observations: I, as_of: NaiveDate) -> Option<I::Item>
where
    I: IntoIterator,
    I::Item: Dated,
{
    latest(observations.into_iter().filter(|obs| obs.date() <= as_of))
}

/// [`latest_as_of`] when a cut-off is given, [`latest`] otherwise
pub fn latest_until<I>(observations: I, as_of: Option<NaiveDate>) -> Option<I::Item>
where
    I: IntoIterator,
    I::Item: Dated,
{
    match as_of {
        Some(date) => latest_as_of(observations, date),
        None => latest(observations),
    }
}
