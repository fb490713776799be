//! ACRI — per-asset-class risk indicators.
//!
//! Each asset class gets a class-specific signal (mean of its variables'
//! normalized, polarity-adjusted z-scores) blended 0.6/0.4 with the
//! global indicator over their common dates. Classes with no usable
//! input series fall back to the GRI outright; a class whose specific
//! signal shares no dates with the GRI comes out empty rather than
//! half-blended. The per-class loop is embarrassingly parallel and runs
//! on the rayon pool.

use crate::catalog::{self, AssetClassDef, Polarity};
use crate::config::AnalysisConfig;
use crate::domain::{PositionBand, TimeSeries, TimeSeriesTable};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Normalization window for class variables.
const NORM_WINDOW: usize = 252;
/// Minimum observations inside the normalization window (~ a quarter).
const NORM_MIN_PERIODS: usize = 63;

/// Band edges for the five-level positioning scale.
const VERY_OVERWEIGHT: f64 = 0.60;
const OVERWEIGHT: f64 = 0.20;
const UNDERWEIGHT: f64 = -0.20;
const VERY_UNDERWEIGHT: f64 = -0.60;

/// One row of the positioning ranking, sorted by indicator value.
#[derive(Debug, Clone, Serialize)]
pub struct RankingEntry {
    pub class_key: String,
    pub class_name: String,
    pub value: f64,
    pub position: PositionBand,
    pub description: String,
}

/// Classify an indicator value into the five-level positioning scale.
///
/// The outer bands are checked before the plain ones so that a value
/// sitting exactly on ±0.60 lands in the outer band.
pub fn classify_position(value: f64) -> PositionBand {
    if value >= VERY_OVERWEIGHT {
        PositionBand::VeryOverweight
    } else if value <= VERY_UNDERWEIGHT {
        PositionBand::VeryUnderweight
    } else if value >= OVERWEIGHT {
        PositionBand::Overweight
    } else if value <= UNDERWEIGHT {
        PositionBand::Underweight
    } else {
        PositionBand::Neutral
    }
}

/// Computes per-class indicators and the cross-class ranking.
#[derive(Debug)]
pub struct AcriEngine<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> AcriEngine<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Indicator for every cataloged asset class, keyed by class key.
    pub fn compute_all(
        &self,
        table: &TimeSeriesTable,
        gri: &TimeSeries,
    ) -> BTreeMap<String, TimeSeries> {
        let results: Vec<(String, TimeSeries)> = catalog::asset_classes()
            .par_iter()
            .map(|class| (class.key.to_string(), self.compute_class(class, table, gri)))
            .collect();
        results.into_iter().collect()
    }

    /// Indicator for a single asset class.
    ///
    /// Falls back to the GRI when none of the class variables are
    /// available; empty when a class signal exists but shares no dates
    /// with the GRI.
    pub fn compute_class(
        &self,
        class: &AssetClassDef,
        table: &TimeSeriesTable,
        gri: &TimeSeries,
    ) -> TimeSeries {
        let specific = self.class_signal(class, table);
        let Some(specific) = specific else {
            info!("acri {}: no class variables available, using the global indicator", class.key);
            return gri.clone().with_code(class.key);
        };

        let joined: Vec<_> = specific.inner_join(gri).collect();
        if joined.is_empty() {
            warn!(
                "acri {}: class signal shares no dates with the global indicator",
                class.key
            );
            return TimeSeries::empty(class.key);
        }

        let w_specific = self.config.acri_specific_weight;
        let w_global = self.config.acri_global_weight;
        let dates = joined.iter().map(|(d, _, _)| *d).collect();
        let values = joined
            .iter()
            .map(|(_, s, g)| (w_specific * s + w_global * g).clamp(-1.0, 1.0))
            .collect();
        TimeSeries::new(class.key, dates, values).expect("inner join preserves date order")
    }

    /// Mean of the class variables' normalized, polarity-adjusted scores
    /// over the union of their axes. `None` when no variable has data.
    fn class_signal(&self, class: &AssetClassDef, table: &TimeSeriesTable) -> Option<TimeSeries> {
        let mut normalized = Vec::new();
        for code in class.variables {
            let Some(series) = table.get(code) else { continue };
            let series = series.dropna();
            if series.is_empty() {
                continue;
            }
            let mut signal =
                crate::normalize::rolling_zscore_scaled(&series, NORM_WINDOW, NORM_MIN_PERIODS);
            if catalog::polarity(code) == Polarity::Inverted {
                signal = signal.scale(-1.0);
            }
            normalized.push(signal);
        }
        if normalized.is_empty() {
            return None;
        }

        let mut axis = BTreeSet::new();
        for signal in &normalized {
            axis.extend(signal.dates().iter().copied());
        }
        let axis: Vec<_> = axis.into_iter().collect();
        let values = axis
            .iter()
            .map(|&date| {
                let present: Vec<f64> = normalized.iter().filter_map(|s| s.get(date)).collect();
                if present.is_empty() {
                    f64::NAN
                } else {
                    present.iter().sum::<f64>() / present.len() as f64
                }
            })
            .collect();
        Some(TimeSeries::new(class.key, axis, values).expect("union axis is sorted and unique"))
    }

    /// Latest-value ranking across all classes, best first.
    ///
    /// Classes whose indicator has no valid observation are omitted.
    pub fn ranking(&self, indicators: &BTreeMap<String, TimeSeries>) -> Vec<RankingEntry> {
        let mut entries: Vec<RankingEntry> = catalog::asset_classes()
            .iter()
            .filter_map(|class| {
                let series = indicators.get(class.key)?;
                let (_, value) = series.last_valid()?;
                Some(RankingEntry {
                    class_key: class.key.to_string(),
                    class_name: class.name.to_string(),
                    value,
                    position: classify_position(value),
                    description: class.description.to_string(),
                })
            })
            .collect();
        entries.sort_by(|a, b| b.value.total_cmp(&a.value));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::codes;
    use chrono::{Duration, NaiveDate};

    fn daily(code: &str, n: usize, f: impl Fn(usize) -> f64) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let dates = (0..n).map(|i| base + Duration::days(i as i64)).collect();
        TimeSeries::new(code, dates, (0..n).map(f).collect()).unwrap()
    }

    #[test]
    fn band_edges_favor_the_outer_bands() {
        assert_eq!(classify_position(0.60), PositionBand::VeryOverweight);
        assert_eq!(classify_position(0.599), PositionBand::Overweight);
        assert_eq!(classify_position(0.20), PositionBand::Overweight);
        assert_eq!(classify_position(0.199), PositionBand::Neutral);
        assert_eq!(classify_position(0.0), PositionBand::Neutral);
        assert_eq!(classify_position(-0.199), PositionBand::Neutral);
        assert_eq!(classify_position(-0.20), PositionBand::Underweight);
        assert_eq!(classify_position(-0.599), PositionBand::Underweight);
        assert_eq!(classify_position(-0.60), PositionBand::VeryUnderweight);
    }

    #[test]
    fn missing_class_variables_fall_back_to_gri() {
        let config = AnalysisConfig::default();
        let engine = AcriEngine::new(&config);
        let gri = daily("gri", 5, |i| 0.1 * i as f64);
        let class = catalog::asset_class("US_EQUITY").unwrap();

        let out = engine.compute_class(class, &TimeSeriesTable::new(), &gri);
        assert_eq!(out.code(), "US_EQUITY");
        assert_eq!(out.values(), gri.values());
    }

    #[test]
    fn disjoint_class_signal_yields_empty_indicator() {
        let config = AnalysisConfig::default();
        let engine = AcriEngine::new(&config);
        // VIX history ends years before the GRI begins.
        let vix = daily(codes::US_VIX, 300, |i| 15.0 + (i as f64 * 0.3).sin() * 5.0);
        let table = TimeSeriesTable::from_columns(vec![vix]).unwrap();
        let gri_base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let gri = TimeSeries::new(
            "gri",
            (0..10).map(|i| gri_base + Duration::days(i)).collect(),
            vec![0.2; 10],
        )
        .unwrap();
        let class = catalog::asset_class("HIGH_YIELD").unwrap();

        let out = engine.compute_class(class, &table, &gri);
        assert!(out.is_empty());
    }

    #[test]
    fn blend_uses_specific_and_global_weights() {
        // A flat VIX never produces a z-score (std = 0), so drive the
        // class signal with a noisy series and check the blend is
        // bounded and lives on the intersection axis.
        let config = AnalysisConfig::default();
        let engine = AcriEngine::new(&config);
        let vix = daily(codes::US_VIX, 400, |i| 15.0 + ((i * 7) % 13) as f64);
        let table = TimeSeriesTable::from_columns(vec![vix]).unwrap();
        let gri = daily("gri", 400, |i| ((i as f64 * 0.05).sin() * 0.8).clamp(-1.0, 1.0));
        let class = catalog::asset_class("HIGH_YIELD").unwrap();

        let out = engine.compute_class(class, &table, &gri);
        assert!(!out.is_empty());
        for v in out.values() {
            assert!(*v >= -1.0 && *v <= 1.0);
        }
    }

    #[test]
    fn compute_all_covers_every_class() {
        let config = AnalysisConfig::default();
        let engine = AcriEngine::new(&config);
        let gri = daily("gri", 50, |i| 0.01 * i as f64);
        let indicators = engine.compute_all(&TimeSeriesTable::new(), &gri);
        assert_eq!(indicators.len(), catalog::asset_classes().len());
        // Everything fell back to the GRI.
        for series in indicators.values() {
            assert_eq!(series.len(), gri.len());
        }
    }

    #[test]
    fn ranking_sorts_descending_and_classifies() {
        let config = AnalysisConfig::default();
        let engine = AcriEngine::new(&config);
        let mut indicators = BTreeMap::new();
        indicators.insert("US_EQUITY".to_string(), daily("US_EQUITY", 1, |_| 0.7));
        indicators.insert("HIGH_YIELD".to_string(), daily("HIGH_YIELD", 1, |_| -0.3));
        indicators.insert("EM_DEBT".to_string(), daily("EM_DEBT", 1, |_| 0.1));
        indicators.insert(
            "MONEY_MARKET".to_string(),
            TimeSeries::empty("MONEY_MARKET"),
        );

        let ranking = engine.ranking(&indicators);
        assert_eq!(ranking.len(), 3); // the empty class is omitted
        assert_eq!(ranking[0].class_key, "US_EQUITY");
        assert_eq!(ranking[0].position, PositionBand::VeryOverweight);
        assert_eq!(ranking[1].class_key, "EM_DEBT");
        assert_eq!(ranking[1].position, PositionBand::Neutral);
        assert_eq!(ranking[2].class_key, "HIGH_YIELD");
        assert_eq!(ranking[2].position, PositionBand::Underweight);
    }
}
