//! Volatility bands around a signal.
//!
//! Classic Bollinger construction: a rolling mean plus/minus a multiple
//! of the rolling sample standard deviation, both over the same full
//! window. Also hosts the volatility-sensitive threshold widening used
//! by dynamic classification.

use crate::domain::TimeSeries;
use crate::normalize::{rolling_mean, rolling_std};

/// Widening factor per unit of volatility.
const VOLATILITY_SENSITIVITY: f64 = 0.5;

/// Upper and lower bands around a signal.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: TimeSeries,
    pub lower: TimeSeries,
}

impl BollingerBands {
    /// Bands at `mean ± width · std` over a full rolling window.
    ///
    /// Rows without a full window of valid observations are missing.
    pub fn compute(series: &TimeSeries, window: usize, width: f64) -> Self {
        let mean = rolling_mean(series, window);
        let std = rolling_std(series, window);

        let upper = band(&mean, &std, width).with_code(format!("{}_upper", series.code()));
        let lower = band(&mean, &std, -width).with_code(format!("{}_lower", series.code()));
        Self { upper, lower }
    }
}

fn band(mean: &TimeSeries, std: &TimeSeries, width: f64) -> TimeSeries {
    let values = mean
        .values()
        .iter()
        .zip(std.values())
        .map(|(m, s)| m + width * s)
        .collect();
    TimeSeries::new(mean.code(), mean.dates().to_vec(), values)
        .expect("band reuses the mean's axis")
}

/// Widen a symmetric threshold pair in proportion to current volatility.
///
/// `volatility` is a non-negative dispersion estimate (e.g. the rolling
/// std of the signal itself); zero leaves the thresholds untouched.
pub fn adjusted_thresholds(base_upper: f64, base_lower: f64, volatility: f64) -> (f64, f64) {
    let factor = 1.0 + volatility.max(0.0) * VOLATILITY_SENSITIVITY;
    (base_upper * factor, base_lower * factor)
}
