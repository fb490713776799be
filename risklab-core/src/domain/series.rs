//! TimeSeries — the fundamental data unit.
//!
//! An ordered sequence of (date, value) pairs with NaN as the missing
//! marker. Dates are strictly increasing; irregular frequency is allowed
//! (daily, weekly, monthly, and quarterly series all share this type).
//! Once constructed a series is never mutated; every transform returns a
//! new series.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

/// Errors from time series construction.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series '{code}': {dates} dates but {values} values")]
    LengthMismatch {
        code: String,
        dates: usize,
        values: usize,
    },

    #[error("series '{code}': duplicate date {date}")]
    DuplicateDate { code: String, date: NaiveDate },

    #[error("series '{code}': dates not sorted ascending at {date}")]
    UnsortedDates { code: String, date: NaiveDate },
}

/// A named, date-indexed numeric series. Missing values are `f64::NAN`.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    code: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Build a series from parallel date/value vectors.
    ///
    /// Dates must be strictly increasing; lengths must match.
    pub fn new(
        code: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        let code = code.into();
        if dates.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                code,
                dates: dates.len(),
                values: values.len(),
            });
        }
        for pair in dates.windows(2) {
            if pair[1] == pair[0] {
                return Err(SeriesError::DuplicateDate {
                    code,
                    date: pair[1],
                });
            }
            if pair[1] < pair[0] {
                return Err(SeriesError::UnsortedDates {
                    code,
                    date: pair[1],
                });
            }
        }
        Ok(Self {
            code,
            dates,
            values,
        })
    }

    /// Build a series from (date, value) pairs, sorting by date.
    pub fn from_pairs(
        code: impl Into<String>,
        mut pairs: Vec<(NaiveDate, f64)>,
    ) -> Result<Self, SeriesError> {
        pairs.sort_by_key(|(d, _)| *d);
        let dates: Vec<NaiveDate> = pairs.iter().map(|(d, _)| *d).collect();
        let values: Vec<f64> = pairs.iter().map(|(_, v)| *v).collect();
        Self::new(code, dates, values)
    }

    /// An empty series with the given code.
    pub fn empty(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Return the same data under a different code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of rows, including missing ones.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of non-missing observations.
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Value at an exact date. `None` when the date is absent or missing.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        let idx = self.dates.binary_search(&date).ok()?;
        let v = self.values[idx];
        if v.is_nan() {
            None
        } else {
            Some(v)
        }
    }

    /// Iterate over non-missing (date, value) pairs.
    pub fn valid(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates
            .iter()
            .zip(self.values.iter())
            .filter(|(_, v)| !v.is_nan())
            .map(|(d, v)| (*d, *v))
    }

    /// The latest non-missing observation, if any.
    pub fn last_valid(&self) -> Option<(NaiveDate, f64)> {
        self.dates
            .iter()
            .zip(self.values.iter())
            .rev()
            .find(|(_, v)| !v.is_nan())
            .map(|(d, v)| (*d, *v))
    }

    /// Drop all missing rows, keeping only valid observations.
    pub fn dropna(&self) -> Self {
        let (dates, values): (Vec<_>, Vec<_>) = self.valid().unzip();
        Self {
            code: self.code.clone(),
            dates,
            values,
        }
    }

    /// Apply a function to every value. NaN rows stay NaN.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        let values = self
            .values
            .iter()
            .map(|&v| if v.is_nan() { f64::NAN } else { f(v) })
            .collect();
        Self {
            code: self.code.clone(),
            dates: self.dates.clone(),
            values,
        }
    }

    /// Multiply every value by a constant.
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Clamp every value into [lo, hi]. NaN rows stay NaN.
    pub fn clip(&self, lo: f64, hi: f64) -> Self {
        self.map(|v| v.clamp(lo, hi))
    }

    /// Difference against the value `lag` observations earlier.
    ///
    /// Positional, like a dense-series diff: the first `lag` rows and any
    /// row whose counterpart is missing come out as NaN.
    pub fn diff(&self, lag: usize) -> Self {
        let n = self.len();
        let mut values = vec![f64::NAN; n];
        for i in lag..n {
            values[i] = self.values[i] - self.values[i - lag];
        }
        Self {
            code: self.code.clone(),
            dates: self.dates.clone(),
            values,
        }
    }

    /// Fractional change against the value `periods` observations earlier.
    pub fn pct_change(&self, periods: usize) -> Self {
        let n = self.len();
        let mut values = vec![f64::NAN; n];
        for i in periods..n {
            let prev = self.values[i - periods];
            if prev != 0.0 {
                values[i] = self.values[i] / prev - 1.0;
            }
        }
        Self {
            code: self.code.clone(),
            dates: self.dates.clone(),
            values,
        }
    }

    /// Last valid observation per calendar month, in date order.
    pub fn monthly_last(&self) -> Vec<(NaiveDate, f64)> {
        let mut out: Vec<(NaiveDate, f64)> = Vec::new();
        for (date, value) in self.valid() {
            match out.last() {
                Some((last, _)) if (last.year(), last.month()) == (date.year(), date.month()) => {
                    *out.last_mut().unwrap() = (date, value);
                }
                _ => out.push((date, value)),
            }
        }
        out
    }

    /// Dates where both series have a valid value, with both values.
    pub fn inner_join<'a>(
        &'a self,
        other: &'a TimeSeries,
    ) -> impl Iterator<Item = (NaiveDate, f64, f64)> + 'a {
        self.valid()
            .filter_map(|(date, v)| other.get(date).map(|w| (date, v, w)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample() -> TimeSeries {
        TimeSeries::new(
            "TEST",
            vec![d("2024-01-02"), d("2024-01-03"), d("2024-01-04")],
            vec![1.0, f64::NAN, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn rejects_unsorted_dates() {
        let err = TimeSeries::new(
            "TEST",
            vec![d("2024-01-03"), d("2024-01-02")],
            vec![1.0, 2.0],
        )
        .unwrap_err();
        assert!(err.to_string().contains("not sorted"));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = TimeSeries::new(
            "TEST",
            vec![d("2024-01-02"), d("2024-01-02")],
            vec![1.0, 2.0],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate date"));
    }

    #[test]
    fn from_pairs_sorts() {
        let ts = TimeSeries::from_pairs(
            "TEST",
            vec![(d("2024-01-04"), 3.0), (d("2024-01-02"), 1.0)],
        )
        .unwrap();
        assert_eq!(ts.dates()[0], d("2024-01-02"));
        assert_eq!(ts.values()[0], 1.0);
    }

    #[test]
    fn get_skips_missing() {
        let ts = sample();
        assert_eq!(ts.get(d("2024-01-02")), Some(1.0));
        assert_eq!(ts.get(d("2024-01-03")), None); // NaN row
        assert_eq!(ts.get(d("2024-01-05")), None); // absent date
    }

    #[test]
    fn dropna_keeps_only_valid() {
        let ts = sample().dropna();
        assert_eq!(ts.len(), 2);
        assert_eq!(ts.valid_count(), 2);
        assert_eq!(ts.values(), &[1.0, 3.0]);
    }

    #[test]
    fn last_valid_skips_trailing_nan() {
        let ts = TimeSeries::new(
            "TEST",
            vec![d("2024-01-02"), d("2024-01-03")],
            vec![5.0, f64::NAN],
        )
        .unwrap();
        assert_eq!(ts.last_valid(), Some((d("2024-01-02"), 5.0)));
    }

    #[test]
    fn diff_is_positional() {
        let ts = TimeSeries::new(
            "TEST",
            vec![d("2024-01-02"), d("2024-01-03"), d("2024-01-04")],
            vec![1.0, 4.0, 9.0],
        )
        .unwrap();
        let diff = ts.diff(1);
        assert!(diff.values()[0].is_nan());
        assert_eq!(diff.values()[1], 3.0);
        assert_eq!(diff.values()[2], 5.0);
    }

    #[test]
    fn pct_change_handles_zero_base() {
        let ts = TimeSeries::new(
            "TEST",
            vec![d("2024-01-02"), d("2024-01-03")],
            vec![0.0, 5.0],
        )
        .unwrap();
        let pct = ts.pct_change(1);
        assert!(pct.values()[1].is_nan());
    }

    #[test]
    fn monthly_last_picks_final_observation() {
        let ts = TimeSeries::new(
            "TEST",
            vec![
                d("2024-01-02"),
                d("2024-01-31"),
                d("2024-02-01"),
                d("2024-02-29"),
            ],
            vec![1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let monthly = ts.monthly_last();
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0], (d("2024-01-31"), 2.0));
        assert_eq!(monthly[1], (d("2024-02-29"), 4.0));
    }

    #[test]
    fn inner_join_intersects_valid_dates() {
        let a = sample();
        let b = TimeSeries::new(
            "OTHER",
            vec![d("2024-01-03"), d("2024-01-04")],
            vec![10.0, 20.0],
        )
        .unwrap();
        let joined: Vec<_> = a.inner_join(&b).collect();
        // 2024-01-03 is NaN in `a`, so only 2024-01-04 survives.
        assert_eq!(joined, vec![(d("2024-01-04"), 3.0, 20.0)]);
    }

    #[test]
    fn clip_preserves_nan() {
        let clipped = sample().clip(0.0, 2.0);
        assert_eq!(clipped.values()[0], 1.0);
        assert!(clipped.values()[1].is_nan());
        assert_eq!(clipped.values()[2], 2.0);
    }
}
