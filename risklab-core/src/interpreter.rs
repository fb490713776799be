//! Interpreter — three directional sub-signals and a consensus vote.
//!
//! Momentum, trend, and seasonality are derived independently over the
//! GRI's date axis, each classifying into {-1, 0, +1}. The consensus
//! rule is a voting override, not a replacement signal: the interpreter
//! only moves the stance when at least two of the three sub-signals
//! agree strongly (|sum| >= 2); otherwise the GRI's own classification
//! wins. Every output row carries the GRI, all three sub-signals, the
//! consensus sum, and the final decision with its label.

use crate::catalog::codes;
use crate::config::AnalysisConfig;
use crate::domain::{Stance, TimeSeries, TimeSeriesTable};
use crate::gri::classify;
use crate::normalize::{rolling_mean, rolling_zscore_scaled};
use chrono::{Datelike, Duration, NaiveDate};
use log::{info, warn};
use serde::Serialize;

/// Momentum/trend normalization window.
const NORM_WINDOW: usize = 252;
/// Minimum observations inside the normalization window.
const NORM_MIN_PERIODS: usize = 50;
/// Momentum classification threshold.
const MOMENTUM_THRESHOLD: f64 = 0.1;
/// Trend classification threshold.
const TREND_THRESHOLD: f64 = 0.3;
/// Margin, in global standard deviations, for a month to classify.
const SEASONALITY_MARGIN: f64 = 0.5;
/// Historically volatile months, never classified positive.
const CAPPED_MONTHS: [u32; 2] = [9, 10];
/// Historically favorable months, never classified negative.
const FLOORED_MONTHS: [u32; 3] = [4, 11, 12];

/// One dated row of the interpreter's output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub gri: f64,
    /// The GRI's own three-way classification as +1/0/-1.
    pub gri_stance: i8,
    pub momentum: i8,
    pub trend: i8,
    pub seasonality: i8,
    /// Sum of the three sub-signals, in -3..=3.
    pub consensus: i8,
    /// Final decision after the voting rule, as +1/0/-1.
    pub decision: i8,
    pub label: Stance,
}

/// Derives the three sub-signals and applies the consensus rule.
#[derive(Debug)]
pub struct InterpreterEngine<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> InterpreterEngine<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Full interpreter pass: sub-signals plus consensus rows.
    ///
    /// Empty when the GRI is empty or too short for any sub-signal to
    /// line up with it.
    pub fn run(
        &self,
        gri: &TimeSeries,
        table: &TimeSeriesTable,
        as_of: NaiveDate,
    ) -> Vec<SignalRow> {
        if gri.valid_count() == 0 {
            warn!("interpreter: empty GRI, nothing to interpret");
            return Vec::new();
        }

        let momentum = self.momentum(gri);
        let trend = self.trend(gri, table);
        let seasonality = self.seasonality(gri, table, as_of);
        let rows = self.consensus(gri, &momentum, &trend, &seasonality);

        match rows.last() {
            Some(last) => info!(
                "interpreter: {} rows, latest decision {} (consensus {:+})",
                rows.len(),
                last.label.label(),
                last.consensus
            ),
            None => warn!("interpreter: no dates where all three sub-signals align"),
        }
        rows
    }

    /// Momentum sub-signal: 90-observation change plus its acceleration,
    /// each self-normalized, blended 0.6/0.4 and classified at ±0.1.
    ///
    /// Needs at least `momentum_window` observations; otherwise empty.
    pub fn momentum(&self, gri: &TimeSeries) -> TimeSeries {
        let window = self.config.momentum_window;
        if gri.len() < window {
            warn!(
                "interpreter: {} observations is too short for momentum (min {window})",
                gri.len()
            );
            return TimeSeries::empty("momentum");
        }

        let raw = gri.diff(window);
        let accel = raw.diff(window / 2);
        let raw_norm = rolling_zscore_scaled(&raw, NORM_WINDOW, NORM_MIN_PERIODS);
        let accel_norm = rolling_zscore_scaled(&accel, NORM_WINDOW, NORM_MIN_PERIODS);

        let values = gri
            .dates()
            .iter()
            .map(|&date| match (raw_norm.get(date), accel_norm.get(date)) {
                (Some(r), Some(a)) => vote(0.6 * r + 0.4 * a, MOMENTUM_THRESHOLD),
                _ => 0.0,
            })
            .collect();
        TimeSeries::new("momentum", gri.dates().to_vec(), values)
            .expect("momentum reuses the GRI axis")
    }

    /// Trend sub-signal: GRI vs its 50/200-period moving averages
    /// (±0.5 each), plus the direction of the high-yield spread and the
    /// volatility index vs their own 50-period averages (±1 each).
    /// Available sub-scores are averaged per date and classified at ±0.3.
    pub fn trend(&self, gri: &TimeSeries, table: &TimeSeriesTable) -> TimeSeries {
        let fast = self.config.trend_fast_window;
        let slow = self.config.trend_slow_window;
        let mut subscores: Vec<TimeSeries> = Vec::new();

        if gri.valid_count() > fast {
            let ma_fast = rolling_mean(gri, fast);
            let ma_slow = rolling_mean(gri, slow);
            let values = gri
                .dates()
                .iter()
                .zip(gri.values())
                .map(|(&date, &v)| {
                    0.5 * side(v, ma_fast.get(date)) + 0.5 * side(v, ma_slow.get(date))
                })
                .collect();
            subscores.push(
                TimeSeries::new("trend_gri", gri.dates().to_vec(), values)
                    .expect("trend reuses the GRI axis"),
            );
        }

        // Spread and volatility direction: falling below the average is
        // risk-friendly for both.
        for code in [codes::US_CREDIT_HY_SPREAD, codes::US_VIX] {
            if let Some(series) = table.get(code) {
                let series = series.dropna();
                if series.valid_count() > fast {
                    let ma = rolling_mean(&series, fast);
                    let values = series
                        .dates()
                        .iter()
                        .zip(series.values())
                        .map(|(&date, &v)| -side(v, ma.get(date)))
                        .collect();
                    subscores.push(
                        TimeSeries::new(
                            format!("trend_{}", code.to_lowercase()),
                            series.dates().to_vec(),
                            values,
                        )
                        .expect("trend reuses a valid series axis"),
                    );
                }
            }
        }

        if subscores.is_empty() {
            // No usable history anywhere: neutral across the GRI axis.
            let zeros = vec![0.0; gri.len()];
            return TimeSeries::new("trend", gri.dates().to_vec(), zeros)
                .expect("trend reuses the GRI axis");
        }

        let mut axis = std::collections::BTreeSet::new();
        for sub in &subscores {
            axis.extend(sub.dates().iter().copied());
        }
        let axis: Vec<NaiveDate> = axis.into_iter().collect();
        let values = axis
            .iter()
            .map(|&date| {
                let present: Vec<f64> = subscores.iter().filter_map(|s| s.get(date)).collect();
                if present.is_empty() {
                    0.0
                } else {
                    vote(
                        present.iter().sum::<f64>() / present.len() as f64,
                        TREND_THRESHOLD,
                    )
                }
            })
            .collect();
        TimeSeries::new("trend", axis, values).expect("union axis is sorted and unique")
    }

    /// Seasonality sub-signal: each calendar month classified against
    /// the distribution of historical monthly returns of the equity
    /// proxy (or the GRI itself), with fixed month overrides.
    pub fn seasonality(
        &self,
        gri: &TimeSeries,
        table: &TimeSeriesTable,
        as_of: NaiveDate,
    ) -> TimeSeries {
        let proxy = table
            .get(codes::US_SP500)
            .map(|s| s.dropna())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| gri.clone());

        let signal_by_month = month_signals(&proxy, as_of, self.config.seasonality_years);

        let values = gri
            .dates()
            .iter()
            .map(|date| f64::from(signal_by_month[date.month() as usize]))
            .collect();
        TimeSeries::new("seasonality", gri.dates().to_vec(), values)
            .expect("seasonality reuses the GRI axis")
    }

    /// Apply the voting rule at every date where all three sub-signals
    /// are defined alongside the GRI.
    pub fn consensus(
        &self,
        gri: &TimeSeries,
        momentum: &TimeSeries,
        trend: &TimeSeries,
        seasonality: &TimeSeries,
    ) -> Vec<SignalRow> {
        let mut rows = Vec::new();
        for (date, gri_value) in gri.valid() {
            let (Some(m), Some(t), Some(s)) = (
                momentum.get(date),
                trend.get(date),
                seasonality.get(date),
            ) else {
                continue;
            };
            let (m, t, s) = (m as i8, t as i8, s as i8);
            let sum = m + t + s;
            let gri_stance = classify(self.config, gri_value).as_signum();
            let decision = if sum >= 2 {
                1
            } else if sum <= -2 {
                -1
            } else {
                gri_stance
            };
            rows.push(SignalRow {
                date,
                gri: gri_value,
                gri_stance,
                momentum: m,
                trend: t,
                seasonality: s,
                consensus: sum,
                decision,
                label: Stance::from_signum(decision),
            });
        }
        rows
    }
}

/// Classify a score into -1/0/+1 against a symmetric threshold.
/// NaN votes 0.
fn vote(score: f64, threshold: f64) -> f64 {
    if score > threshold {
        1.0
    } else if score < -threshold {
        -1.0
    } else {
        0.0
    }
}

/// +1 above the reference, -1 below, 0 when equal or undefined.
fn side(value: f64, reference: Option<f64>) -> f64 {
    match reference {
        Some(r) if value > r => 1.0,
        Some(r) if value < r => -1.0,
        _ => 0.0,
    }
}

/// Per-calendar-month signal from historical monthly returns.
///
/// Index 1..=12 by month number; index 0 is unused.
fn month_signals(proxy: &TimeSeries, as_of: NaiveDate, years: u32) -> [i8; 13] {
    let mut signals = [0i8; 13];

    let monthly = proxy.monthly_last();
    let cutoff = as_of - Duration::days(365 * i64::from(years));
    let returns: Vec<(u32, f64)> = monthly
        .windows(2)
        .filter(|w| w[1].0 >= cutoff && w[0].1 != 0.0)
        .map(|w| (w[1].0.month(), w[1].1 / w[0].1 - 1.0))
        .collect();

    if returns.len() >= 2 {
        let n = returns.len() as f64;
        let mean = returns.iter().map(|(_, r)| r).sum::<f64>() / n;
        let variance = returns
            .iter()
            .map(|(_, r)| (r - mean) * (r - mean))
            .sum::<f64>()
            / (n - 1.0);
        let std = variance.sqrt();

        if std.is_finite() && std > 0.0 {
            let mut sums = [0.0f64; 13];
            let mut counts = [0usize; 13];
            for (month, r) in &returns {
                sums[*month as usize] += r;
                counts[*month as usize] += 1;
            }
            for month in 1..=12usize {
                if counts[month] == 0 {
                    continue;
                }
                let month_mean = sums[month] / counts[month] as f64;
                if month_mean > mean + SEASONALITY_MARGIN * std {
                    signals[month] = 1;
                } else if month_mean < mean - SEASONALITY_MARGIN * std {
                    signals[month] = -1;
                }
            }
        }
    }

    for month in CAPPED_MONTHS {
        signals[month as usize] = signals[month as usize].min(0);
    }
    for month in FLOORED_MONTHS {
        signals[month as usize] = signals[month as usize].max(0);
    }

    signals
}
