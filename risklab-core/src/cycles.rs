//! Market-cycle and economic-cycle engines.
//!
//! Each engine instantiates the normalize-then-aggregate pipeline over a
//! fixed variable set with fixed relative weights. Absent input series
//! are simply omitted and the remaining weights renormalize; an engine
//! only fails (returns an empty signal) when zero components are
//! available.

use crate::aggregate::{combine, WeightedComponent};
use crate::catalog::codes;
use crate::domain::{TimeSeries, TimeSeriesTable};
use crate::normalize::rolling_zscore;
use log::{info, warn};

/// Output code of the market-cycle composite.
pub const MARKET_CYCLE: &str = "market_cycle";
/// Output code of the economic-cycle composite.
pub const ECONOMIC_CYCLE: &str = "economic_cycle";

/// Observations in a 6-month window of daily data.
const SIX_MONTHS: usize = 126;
/// Observations in a 1-year window of monthly data.
const TWELVE_MONTHS: usize = 12;

/// Market sentiment composite: volatility, credit spreads, curve slope,
/// equity momentum, and financial conditions.
#[derive(Debug, Default)]
pub struct MarketCycleEngine;

impl MarketCycleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the market-cycle composite over whichever inputs exist.
    pub fn compute(&self, table: &TimeSeriesTable) -> TimeSeries {
        let mut components = Vec::new();

        // Implied volatility, inverted: high VIX is a negative signal.
        if let Some(series) = valid_column(table, codes::US_VIX) {
            let signal = rolling_zscore(&series, 252, 126).scale(-1.0);
            push_component(&mut components, "volatility", signal, 0.25);
        }

        // High-yield spread, inverted.
        if let Some(series) = valid_column(table, codes::US_CREDIT_HY_SPREAD) {
            let signal = rolling_zscore(&series, 252, 126).scale(-1.0);
            push_component(&mut components, "hy_spread", signal, 0.20);
        }

        // Investment-grade spread, inverted.
        if let Some(series) = valid_column(table, codes::US_CREDIT_IG_SPREAD) {
            let signal = rolling_zscore(&series, 252, 126).scale(-1.0);
            push_component(&mut components, "ig_spread", signal, 0.15);
        }

        // 10y-2y slope: positive slope reads expansionary.
        if let Some(series) = valid_column(table, codes::US_SPREAD_10Y2Y) {
            let signal = rolling_zscore(&series, 252, 126);
            push_component(&mut components, "curve_slope", signal, 0.15);
        }

        // Broad equity 6-month momentum.
        if let Some(series) = valid_column(table, codes::US_SP500) {
            if series.len() > SIX_MONTHS {
                let momentum = series.pct_change(SIX_MONTHS);
                let signal = rolling_zscore(&momentum, 252, 126);
                push_component(&mut components, "equity_momentum", signal, 0.15);
            }
        }

        // Financial conditions index: above zero means restrictive, so
        // invert before normalizing over its weekly cadence.
        if let Some(series) = valid_column(table, codes::US_FINANCIAL_CONDITIONS) {
            let signal = rolling_zscore(&series.scale(-1.0), 52, 26);
            push_component(&mut components, "financial_conditions", signal, 0.10);
        }

        if components.is_empty() {
            warn!("market cycle: no input series available");
            return TimeSeries::empty(MARKET_CYCLE);
        }

        let composite = combine(MARKET_CYCLE, &components);
        info!(
            "market cycle: {} components, {} observations",
            components.len(),
            composite.len()
        );
        composite
    }
}

/// Real-economy composite: activity index, PMI, unemployment, industrial
/// production, and initial claims.
#[derive(Debug, Default)]
pub struct EconomicCycleEngine;

impl EconomicCycleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Compute the economic-cycle composite over whichever inputs exist.
    pub fn compute(&self, table: &TimeSeriesTable) -> TimeSeries {
        let mut components = Vec::new();

        // The activity index is already z-score shaped (mean 0), so it is
        // clipped and rescaled rather than re-normalized.
        if let Some(series) = valid_column(table, codes::US_CFNAI) {
            let signal = series.clip(-3.0, 3.0).scale(1.0 / 3.0);
            push_component(&mut components, "activity_index", signal, 0.40);
        }

        // Manufacturing PMI: 50 is the expansion/contraction pivot.
        if let Some(series) = valid_column(table, codes::US_ISM_MANUFACTURING) {
            let signal = series.map(|v| (v - 50.0) / 15.0).clip(-1.0, 1.0);
            push_component(&mut components, "manufacturing_pmi", signal, 0.20);
        }

        // Unemployment rate vs its own two-year history, inverted.
        if let Some(series) = valid_column(table, codes::US_UNEMPLOYMENT_RATE) {
            let signal = rolling_zscore(&series, 520, 260).scale(-1.0);
            push_component(&mut components, "unemployment", signal, 0.15);
        }

        // Industrial production, year-over-year.
        if let Some(series) = valid_column(table, codes::US_INDUSTRIAL_PRODUCTION) {
            if series.len() > TWELVE_MONTHS {
                let yoy = series.pct_change(TWELVE_MONTHS).scale(100.0);
                let signal = rolling_zscore(&yoy, 120, 60);
                push_component(&mut components, "industrial_production", signal, 0.15);
            }
        }

        // Initial jobless claims, inverted.
        if let Some(series) = valid_column(table, codes::US_INITIAL_CLAIMS) {
            let signal = rolling_zscore(&series, 52, 26).scale(-1.0);
            push_component(&mut components, "initial_claims", signal, 0.10);
        }

        if components.is_empty() {
            warn!("economic cycle: no input series available");
            return TimeSeries::empty(ECONOMIC_CYCLE);
        }

        let composite = combine(ECONOMIC_CYCLE, &components);
        info!(
            "economic cycle: {} components, {} observations",
            components.len(),
            composite.len()
        );
        composite
    }
}

/// A column with at least one valid observation, dropna'd.
fn valid_column(table: &TimeSeriesTable, code: &str) -> Option<TimeSeries> {
    let series = table.get(code)?.dropna();
    if series.is_empty() {
        None
    } else {
        Some(series)
    }
}

fn push_component(
    components: &mut Vec<WeightedComponent>,
    label: &str,
    signal: TimeSeries,
    weight: f64,
) {
    info!("  component {label}: {} obs (weight {weight})", signal.len());
    components.push(WeightedComponent::new(label, signal, weight));
}
