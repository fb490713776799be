//! Weighted component aggregation.
//!
//! Real economic series publish at different frequencies and lags;
//! dropping any row with a single missing field would collapse the usable
//! date range to nearly nothing. Instead: outer-join all component axes,
//! fill internal gaps with time-proportional interpolation (capped at 5
//! consecutive rows per gap, never extrapolating past a component's first
//! or last valid date), and let residual missing rows contribute zero
//! while their component's weight still counts in the normalization.
//! A capped gap therefore silently lowers the combined signal for those
//! rows — a deliberate tradeoff, not an error.

use crate::domain::TimeSeries;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Rows filled per internal gap run before the remainder stays missing.
pub const MAX_GAP_FILL: usize = 5;

/// One labeled, weighted input to an aggregation.
#[derive(Debug, Clone)]
pub struct WeightedComponent {
    pub label: String,
    pub series: TimeSeries,
    pub weight: f64,
}

impl WeightedComponent {
    pub fn new(label: impl Into<String>, series: TimeSeries, weight: f64) -> Self {
        debug_assert!(weight > 0.0, "component weight must be positive");
        Self {
            label: label.into(),
            series,
            weight,
        }
    }
}

/// Combine weighted components into one composite series.
///
/// Weights are normalized to sum to 1 over all supplied components.
/// Returns an empty series when no components are given.
pub fn combine(code: &str, components: &[WeightedComponent]) -> TimeSeries {
    if components.is_empty() {
        return TimeSeries::empty(code);
    }

    let mut axis = BTreeSet::new();
    for component in components {
        axis.extend(component.series.dates().iter().copied());
    }
    let axis: Vec<NaiveDate> = axis.into_iter().collect();

    let weight_sum: f64 = components.iter().map(|c| c.weight).sum();
    let mut out = vec![0.0; axis.len()];

    for component in components {
        let weight = component.weight / weight_sum;
        let aligned = align_to_axis(&component.series, &axis);
        let filled = interpolate_capped(&axis, aligned, MAX_GAP_FILL);
        for (acc, value) in out.iter_mut().zip(filled) {
            if !value.is_nan() {
                *acc += weight * value;
            }
        }
    }

    TimeSeries::new(code, axis, out).expect("union axis is sorted and unique")
}

/// Project a series onto a (sorted) axis, NaN where a date is absent.
fn align_to_axis(series: &TimeSeries, axis: &[NaiveDate]) -> Vec<f64> {
    axis.iter()
        .map(|date| series.get(*date).unwrap_or(f64::NAN))
        .collect()
}

/// Fill internal gaps by time-proportional linear interpolation.
///
/// Only the first `cap` missing rows of each gap run are filled; rows
/// beyond the cap stay missing. Leading and trailing gaps are never
/// touched (no extrapolation).
fn interpolate_capped(axis: &[NaiveDate], mut values: Vec<f64>, cap: usize) -> Vec<f64> {
    let mut prev_valid: Option<usize> = None;
    let mut i = 0;

    while i < values.len() {
        if !values[i].is_nan() {
            prev_valid = Some(i);
            i += 1;
            continue;
        }

        // Start of a gap run: find its end.
        let gap_start = i;
        while i < values.len() && values[i].is_nan() {
            i += 1;
        }
        let (Some(left), true) = (prev_valid, i < values.len()) else {
            continue; // leading or trailing gap
        };
        let right = i;

        let left_value = values[left];
        let right_value = values[right];
        let span = (axis[right] - axis[left]).num_days() as f64;
        if span <= 0.0 {
            continue;
        }

        for j in gap_start..right.min(gap_start + cap) {
            let t = (axis[j] - axis[left]).num_days() as f64 / span;
            values[j] = left_value + t * (right_value - left_value);
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn daily(code: &str, start: &str, values: &[f64]) -> TimeSeries {
        let base = d(start);
        let dates = (0..values.len())
            .map(|i| base + Duration::days(i as i64))
            .collect();
        TimeSeries::new(code, dates, values.to_vec()).unwrap()
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(combine("composite", &[]).is_empty());
    }

    #[test]
    fn weights_normalize_to_one() {
        // Raw weights 2 and 6 → 0.25 / 0.75.
        let a = daily("A", "2024-01-01", &[1.0, 1.0]);
        let b = daily("B", "2024-01-01", &[2.0, 2.0]);
        let combined = combine(
            "composite",
            &[
                WeightedComponent::new("a", a, 2.0),
                WeightedComponent::new("b", b, 6.0),
            ],
        );
        assert_eq!(combined.values()[0], 0.25 * 1.0 + 0.75 * 2.0);
    }

    #[test]
    fn outer_join_preserves_all_dates() {
        let a = daily("A", "2024-01-01", &[1.0]);
        let b = daily("B", "2024-01-05", &[3.0]);
        let combined = combine(
            "composite",
            &[
                WeightedComponent::new("a", a, 1.0),
                WeightedComponent::new("b", b, 1.0),
            ],
        );
        assert_eq!(combined.len(), 2);
        // Each row only has one component present; the other contributes 0.
        assert_eq!(combined.values()[0], 0.5);
        assert_eq!(combined.values()[1], 1.5);
    }

    #[test]
    fn single_gap_is_interpolated_not_zeroed() {
        let a = daily("A", "2024-01-01", &[1.0, f64::NAN, 3.0]);
        let combined = combine("composite", &[WeightedComponent::new("a", a, 1.0)]);
        // Gap span 1 <= 5: time-proportional fill, halfway between 1 and 3.
        assert_eq!(combined.values()[1], 2.0);
    }

    #[test]
    fn interpolation_is_time_proportional() {
        // Valid on day 0 and day 10, missing on day 2 (irregular axis).
        let a = TimeSeries::new(
            "A",
            vec![d("2024-01-01"), d("2024-01-03"), d("2024-01-11")],
            vec![0.0, f64::NAN, 10.0],
        )
        .unwrap();
        let combined = combine("composite", &[WeightedComponent::new("a", a, 1.0)]);
        // 2 of 10 days elapsed → 2.0, not the positional midpoint 5.0.
        assert_eq!(combined.values()[1], 2.0);
    }

    #[test]
    fn gap_beyond_cap_contributes_zero_with_weight_counted() {
        // Component A has an 8-row interior gap; only the first 5 rows
        // are filled, the residual 3 stay missing and contribute 0 while
        // A's weight still dilutes the combination.
        let mut a_values = vec![1.0];
        a_values.extend(std::iter::repeat(f64::NAN).take(8));
        a_values.push(1.0);
        let a = daily("A", "2024-01-01", &a_values);
        let b = daily("B", "2024-01-01", &[2.0; 10]);

        let combined = combine(
            "composite",
            &[
                WeightedComponent::new("a", a, 1.0),
                WeightedComponent::new("b", b, 1.0),
            ],
        );

        // Rows 1..=5 of the gap are interpolated (value 1.0 throughout,
        // endpoints being equal), rows 6..=8 are residual-missing.
        for i in 1..=5 {
            assert_eq!(combined.values()[i], 0.5 * 1.0 + 0.5 * 2.0, "row {i}");
        }
        for i in 6..=8 {
            assert_eq!(combined.values()[i], 0.5 * 2.0, "row {i}");
        }
    }

    #[test]
    fn no_extrapolation_before_first_or_after_last_valid() {
        let a = TimeSeries::new(
            "A",
            vec![d("2024-01-01"), d("2024-01-02"), d("2024-01-03")],
            vec![f64::NAN, 5.0, f64::NAN],
        )
        .unwrap();
        let b = daily("B", "2024-01-01", &[1.0, 1.0, 1.0]);
        let combined = combine(
            "composite",
            &[
                WeightedComponent::new("a", a, 1.0),
                WeightedComponent::new("b", b, 1.0),
            ],
        );
        // Leading/trailing gaps of A are never filled: rows 0 and 2 only
        // carry B's weighted value.
        assert_eq!(combined.values()[0], 0.5);
        assert_eq!(combined.values()[1], 0.5 * 5.0 + 0.5);
        assert_eq!(combined.values()[2], 0.5);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Final weights sum to 1 regardless of raw magnitudes: a
            /// combination of constant-1 components is exactly 1.
            #[test]
            fn normalized_weights_sum_to_one(weights in prop::collection::vec(0.01f64..1e4, 1..8)) {
                let components: Vec<WeightedComponent> = weights
                    .iter()
                    .enumerate()
                    .map(|(i, &w)| {
                        WeightedComponent::new(
                            format!("c{i}"),
                            daily("C", "2024-01-01", &[1.0, 1.0, 1.0]),
                            w,
                        )
                    })
                    .collect();
                let combined = combine("composite", &components);
                for v in combined.values() {
                    prop_assert!((v - 1.0).abs() < 1e-9);
                }
            }
        }
    }
}
