//! Table loading and data resolution for the runner.
//!
//! Input is a wide CSV (one `date` column, one column per series code)
//! with empty cells for missing observations. A provider chain covers
//! series the file doesn't have: each provider is tried in order and a
//! series that no provider can supply is simply absent, leaving the
//! engines to degrade. Synthetic data is a developer-only debug mode;
//! outputs built on it are tagged through the dataset hash.

use chrono::{Datelike, Duration, NaiveDate};
use log::warn;
use risklab_core::domain::{SeriesError, TableError};
use risklab_core::{TimeSeries, TimeSeriesTable};
use std::path::Path;
use thiserror::Error;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error in '{path}': {source}")]
    Csv { path: String, source: csv::Error },

    #[error("'{path}' has no '{expected}' column (found '{found}')")]
    MissingDateColumn {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("bad date '{value}' at line {line}")]
    BadDate { line: usize, value: String },

    #[error("bad number '{value}' for {code} at line {line}")]
    BadNumber {
        line: usize,
        code: String,
        value: String,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Header of the date column in wide CSV files.
const DATE_COLUMN: &str = "date";

/// Load a wide CSV into a table.
///
/// The first column must be `date` (ISO `YYYY-MM-DD`); every other
/// header names a series. Empty cells and `NaN` are missing values.
/// Rows may arrive out of order; each column is sorted by date.
pub fn load_table_csv(path: &Path) -> Result<TimeSeriesTable, LoadError> {
    let display = path.display().to_string();
    let mut reader = csv::Reader::from_path(path).map_err(|e| LoadError::Csv {
        path: display.clone(),
        source: e,
    })?;

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Csv {
            path: display.clone(),
            source: e,
        })?
        .clone();
    let first = headers.get(0).unwrap_or("");
    if !first.eq_ignore_ascii_case(DATE_COLUMN) {
        return Err(LoadError::MissingDateColumn {
            path: display,
            expected: DATE_COLUMN,
            found: first.to_string(),
        });
    }
    let codes: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    let mut columns: Vec<Vec<(NaiveDate, f64)>> = vec![Vec::new(); codes.len()];

    for (row_idx, record) in reader.records().enumerate() {
        let line = row_idx + 2; // 1-based, after the header
        let record = record.map_err(|e| LoadError::Csv {
            path: display.clone(),
            source: e,
        })?;
        let raw_date = record.get(0).unwrap_or("");
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            LoadError::BadDate {
                line,
                value: raw_date.to_string(),
            }
        })?;

        for (col, code) in codes.iter().enumerate() {
            let cell = record.get(col + 1).unwrap_or("").trim();
            let value = if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
                f64::NAN
            } else {
                cell.parse::<f64>().map_err(|_| LoadError::BadNumber {
                    line,
                    code: code.clone(),
                    value: cell.to_string(),
                })?
            };
            columns[col].push((date, value));
        }
    }

    let mut table = TimeSeriesTable::new();
    for (code, pairs) in codes.into_iter().zip(columns) {
        table.insert(TimeSeries::from_pairs(code, pairs)?)?;
    }
    Ok(table)
}

/// Errors from a series provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider '{provider}' has no series '{code}'")]
    NotAvailable { provider: String, code: String },

    #[error("provider '{provider}' failed for '{code}': {reason}")]
    Failed {
        provider: String,
        code: String,
        reason: String,
    },
}

/// A source of raw series data (file mirror, HTTP API, fixture set).
pub trait SeriesProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the provider can be queried at all right now.
    fn is_available(&self) -> bool {
        true
    }

    fn fetch(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TimeSeries, ProviderError>;
}

/// Try each provider in order until one returns the series.
///
/// Failures are logged and skipped; `None` means every provider failed
/// or was unavailable, which the caller treats as a missing column.
pub fn fetch_with_fallback(
    providers: &[&dyn SeriesProvider],
    code: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<TimeSeries> {
    for provider in providers {
        if !provider.is_available() {
            continue;
        }
        match provider.fetch(code, start, end) {
            Ok(series) => return Some(series),
            Err(e) => warn!("fetch {code}: {e}"),
        }
    }
    None
}

/// Deterministic synthetic table for the given codes over weekdays.
///
/// Each series is a random walk seeded from its code, so the same
/// inputs always produce the same table. Development use only.
pub fn synthetic_table(codes: &[&str], start: NaiveDate, end: NaiveDate) -> TimeSeriesTable {
    let mut table = TimeSeriesTable::new();
    for code in codes {
        // insert cannot fail: synthetic codes are deduplicated upstream
        // and dates are generated strictly ascending.
        if table.contains(code) {
            continue;
        }
        table
            .insert(synthetic_series(code, start, end))
            .expect("synthetic dates are strictly ascending");
    }
    table
}

fn synthetic_series(code: &str, start: NaiveDate, end: NaiveDate) -> TimeSeries {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let seed: [u8; 32] = *blake3::hash(code.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut dates = Vec::new();
    let mut values = Vec::new();
    let mut level = 100.0_f64;
    let mut current = start;
    while current <= end {
        let weekday = current.weekday();
        if weekday == chrono::Weekday::Sat || weekday == chrono::Weekday::Sun {
            current += Duration::days(1);
            continue;
        }
        level *= 1.0 + rng.gen_range(-0.02..0.02);
        dates.push(current);
        values.push(level);
        current += Duration::days(1);
    }

    TimeSeries::new(code, dates, values).expect("generated dates are strictly ascending")
}

/// Deterministic BLAKE3 fingerprint of a table's full contents.
///
/// Covers codes, dates, and value bits in code order, so two loads of
/// the same data always hash identically regardless of load path.
pub fn dataset_hash(table: &TimeSeriesTable) -> String {
    let mut hasher = blake3::Hasher::new();
    for series in table.columns() {
        hasher.update(series.code().as_bytes());
        for (date, value) in series.dates().iter().zip(series.values()) {
            hasher.update(date.to_string().as_bytes());
            hasher.update(&value.to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}
