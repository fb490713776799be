//! Rolling normalization — the universal building block that turns
//! heterogeneous raw units into comparable signals.
//!
//! The z-score works over a series' valid observations: for each
//! observation with at least `min_periods` points in its trailing window
//! of `window` observations, `z = (x - mean) / std` with the sample
//! standard deviation, clipped to [-3, 3]. Insufficient history and
//! zero/non-finite std both come out as missing, never as an error.

use crate::domain::TimeSeries;

/// Hard clip applied to every z-score.
pub const ZSCORE_CLIP: f64 = 3.0;

/// Rolling z-score over valid observations, clipped to [-3, 3].
pub fn rolling_zscore(series: &TimeSeries, window: usize, min_periods: usize) -> TimeSeries {
    let valid = series.dropna();
    let values = valid.values();
    let n = values.len();
    let mut out = vec![f64::NAN; n];

    for i in 0..n {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        if slice.len() < min_periods.max(2) {
            continue;
        }
        let (mean, std) = mean_std(slice);
        if std > 0.0 && std.is_finite() {
            out[i] = ((values[i] - mean) / std).clamp(-ZSCORE_CLIP, ZSCORE_CLIP);
        }
    }

    TimeSeries::new(series.code(), valid.dates().to_vec(), out)
        .expect("valid dates came from an existing series")
}

/// Rolling z-score divided by 3 after the clip, landing in [-1, 1].
///
/// Used wherever a component feeds a blend that is itself bounded to
/// [-1, 1] (interpreter momentum, ACRI class signals).
pub fn rolling_zscore_scaled(series: &TimeSeries, window: usize, min_periods: usize) -> TimeSeries {
    rolling_zscore(series, window, min_periods).scale(1.0 / ZSCORE_CLIP)
}

/// Rolling mean over valid observations; missing until a full window.
pub fn rolling_mean(series: &TimeSeries, window: usize) -> TimeSeries {
    rolling_stat(series, window, |slice| mean_std(slice).0)
}

/// Rolling sample standard deviation; missing until a full window.
pub fn rolling_std(series: &TimeSeries, window: usize) -> TimeSeries {
    rolling_stat(series, window, |slice| mean_std(slice).1)
}

fn rolling_stat(series: &TimeSeries, window: usize, stat: impl Fn(&[f64]) -> f64) -> TimeSeries {
    let valid = series.dropna();
    let values = valid.values();
    let n = values.len();
    let mut out = vec![f64::NAN; n];

    if window >= 1 {
        for i in (window - 1)..n {
            out[i] = stat(&values[i + 1 - window..=i]);
        }
    }

    TimeSeries::new(series.code(), valid.dates().to_vec(), out)
        .expect("valid dates came from an existing series")
}

/// Mean and sample standard deviation (ddof = 1) of a slice.
fn mean_std(slice: &[f64]) -> (f64, f64) {
    let n = slice.len() as f64;
    let mean = slice.iter().sum::<f64>() / n;
    if slice.len() < 2 {
        return (mean, f64::NAN);
    }
    let variance = slice.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeSeries;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    pub(crate) fn daily_series(code: &str, values: &[f64]) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| base + Duration::days(i as i64))
            .collect();
        TimeSeries::new(code, dates, values.to_vec()).unwrap()
    }

    #[test]
    fn zscore_missing_until_min_periods() {
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ts = daily_series("X", &values);
        let z = rolling_zscore(&ts, 10, 5);
        for i in 0..4 {
            assert!(z.values()[i].is_nan(), "index {i} should be missing");
        }
        assert!(!z.values()[4].is_nan());
    }

    #[test]
    fn zscore_constant_series_is_missing() {
        // std = 0 must yield missing, not an error or infinity.
        let ts = daily_series("X", &[5.0; 20]);
        let z = rolling_zscore(&ts, 10, 5);
        assert!(z.values().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn zscore_is_clipped() {
        // One huge outlier after a long flat run: the raw z-score is
        // about 3.75 for a 16-observation window, so the clip engages.
        let mut values = vec![1.0; 15];
        values.push(1_000.0);
        let ts = daily_series("X", &values);
        let z = rolling_zscore(&ts, 20, 5);
        let last = *z.values().last().unwrap();
        assert_eq!(last, ZSCORE_CLIP);
    }

    #[test]
    fn zscore_ignores_missing_rows() {
        // Interior NaN rows are dropped before windowing, so the window
        // spans valid observations only.
        let ts = daily_series("X", &[1.0, f64::NAN, 2.0, 3.0, f64::NAN, 4.0, 5.0, 6.0]);
        let z = rolling_zscore(&ts, 4, 2);
        assert_eq!(z.len(), 6);
        assert!(z.values()[0].is_nan());
        assert!(!z.values()[1].is_nan());
    }

    #[test]
    fn scaled_zscore_lands_in_unit_interval() {
        let values: Vec<f64> = (0..300).map(|i| (i as f64 * 0.7).sin() * 10.0).collect();
        let ts = daily_series("X", &values);
        let z = rolling_zscore_scaled(&ts, 252, 63);
        for v in z.values().iter().filter(|v| !v.is_nan()) {
            assert!(*v >= -1.0 && *v <= 1.0);
        }
    }

    #[test]
    fn rolling_mean_needs_full_window() {
        let ts = daily_series("X", &[1.0, 2.0, 3.0, 4.0]);
        let mean = rolling_mean(&ts, 3);
        assert!(mean.values()[0].is_nan());
        assert!(mean.values()[1].is_nan());
        assert_eq!(mean.values()[2], 2.0);
        assert_eq!(mean.values()[3], 3.0);
    }

    #[test]
    fn rolling_std_matches_sample_formula() {
        let ts = daily_series("X", &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let std = rolling_std(&ts, 8);
        let last = *std.values().last().unwrap();
        // Sample std of the classic 2,4,4,4,5,5,7,9 set.
        assert!((last - 2.138089935299395).abs() < 1e-12);
    }

    proptest! {
        /// Normalizer output is always within [-3, 3] or missing —
        /// never finite-but-unbounded.
        #[test]
        fn zscore_always_bounded(values in prop::collection::vec(-1e6f64..1e6, 1..200)) {
            let ts = daily_series("X", &values);
            let z = rolling_zscore(&ts, 30, 5);
            for v in z.values() {
                prop_assert!(v.is_nan() || (*v >= -ZSCORE_CLIP && *v <= ZSCORE_CLIP));
            }
        }
    }
}
