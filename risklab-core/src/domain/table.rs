//! TimeSeriesTable — the read-only store all engines consume.
//!
//! A mapping from series code to TimeSeries. Columns keep their own date
//! axes; consumers outer-join on demand. Identifiers are unique.

use super::series::TimeSeries;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors from table construction.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("duplicate series code '{code}'")]
    DuplicateCode { code: String },
}

/// An ordered map of named time series.
#[derive(Debug, Clone, Default)]
pub struct TimeSeriesTable {
    columns: BTreeMap<String, TimeSeries>,
}

impl TimeSeriesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list of series. Codes must be unique.
    pub fn from_columns(columns: Vec<TimeSeries>) -> Result<Self, TableError> {
        let mut table = Self::new();
        for series in columns {
            table.insert(series)?;
        }
        Ok(table)
    }

    /// Insert a series, rejecting duplicate codes.
    pub fn insert(&mut self, series: TimeSeries) -> Result<(), TableError> {
        if self.columns.contains_key(series.code()) {
            return Err(TableError::DuplicateCode {
                code: series.code().to_string(),
            });
        }
        self.columns.insert(series.code().to_string(), series);
        Ok(())
    }

    pub fn get(&self, code: &str) -> Option<&TimeSeries> {
        self.columns.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.columns.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|s| s.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &TimeSeries> {
        self.columns.values()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Union of all column date axes, sorted ascending.
    pub fn date_axis(&self) -> Vec<NaiveDate> {
        let mut axis = BTreeSet::new();
        for series in self.columns.values() {
            axis.extend(series.dates().iter().copied());
        }
        axis.into_iter().collect()
    }
}
