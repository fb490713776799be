//! Global Risk Indicator (GRI).
//!
//! The GRI is the weighted blend of the market and economic cycles over
//! their common dates (strict inner join — rows absent in either cycle
//! are dropped, unlike the looser component aggregator), clipped to
//! [-1, 1] and classified three ways against fixed thresholds.

use crate::config::AnalysisConfig;
use crate::domain::{Stance, TimeSeries};
use log::{error, info};

/// Output code of the GRI series.
pub const GRI: &str = "gri";

/// Classify a GRI value against the configured thresholds.
///
/// NaN classifies NEUTRAL: a missing value must never force a
/// directional stance.
pub fn classify(config: &AnalysisConfig, value: f64) -> Stance {
    if value > config.aggressive_threshold {
        Stance::Aggressive
    } else if value < config.defensive_threshold {
        Stance::Defensive
    } else {
        Stance::Neutral
    }
}

/// Blends the two cycle composites into the global indicator.
#[derive(Debug)]
pub struct GriEngine<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> GriEngine<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Weighted blend over common dates, clipped to [-1, 1].
    ///
    /// Empty when either cycle is empty or the two share no dates.
    pub fn compute(&self, market: &TimeSeries, economic: &TimeSeries) -> TimeSeries {
        if market.valid_count() == 0 {
            error!("gri: market cycle is empty");
            return TimeSeries::empty(GRI);
        }
        if economic.valid_count() == 0 {
            error!("gri: economic cycle is empty");
            return TimeSeries::empty(GRI);
        }

        let joined: Vec<_> = market.inner_join(economic).collect();
        if joined.is_empty() {
            error!("gri: market and economic cycles share no dates");
            return TimeSeries::empty(GRI);
        }

        let dates = joined.iter().map(|(d, _, _)| *d).collect();
        let values = joined
            .iter()
            .map(|(_, m, e)| {
                (self.config.market_weight * m + self.config.economic_weight * e).clamp(-1.0, 1.0)
            })
            .collect();

        let gri = TimeSeries::new(GRI, dates, values).expect("inner join preserves date order");
        if let Some((date, value)) = gri.last_valid() {
            info!(
                "gri: {} observations, latest {value:.3} ({}) on {date}",
                gri.len(),
                classify(self.config, value).label()
            );
        }
        gri
    }

    pub fn classify(&self, value: f64) -> Stance {
        classify(self.config, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn daily(code: &str, start_offset: i64, values: &[f64]) -> TimeSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(start_offset);
        let dates = (0..values.len())
            .map(|i| base + Duration::days(i as i64))
            .collect();
        TimeSeries::new(code, dates, values.to_vec()).unwrap()
    }

    #[test]
    fn default_weights_blend_scenario() {
        // MarketCycle = 0.5, EconomicCycle = -0.1 over 3 aligned dates
        // with 0.5/0.5 weights ⇒ GRI = 0.2, AGGRESSIVE at every date.
        let config = AnalysisConfig::default();
        let engine = GriEngine::new(&config);
        let market = daily("market_cycle", 0, &[0.5, 0.5, 0.5]);
        let economic = daily("economic_cycle", 0, &[-0.1, -0.1, -0.1]);

        let gri = engine.compute(&market, &economic);
        assert_eq!(gri.len(), 3);
        for &v in gri.values() {
            assert!((v - 0.2).abs() < 1e-12);
            assert_eq!(engine.classify(v), Stance::Aggressive);
        }
    }

    #[test]
    fn inner_join_drops_unshared_dates() {
        let config = AnalysisConfig::default();
        let engine = GriEngine::new(&config);
        let market = daily("market_cycle", 0, &[0.4, 0.4, 0.4]);
        let economic = daily("economic_cycle", 2, &[0.2, 0.2, 0.2]);

        // Only one overlapping date.
        let gri = engine.compute(&market, &economic);
        assert_eq!(gri.len(), 1);
        assert!((gri.values()[0] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn empty_cycle_yields_empty_gri() {
        let config = AnalysisConfig::default();
        let engine = GriEngine::new(&config);
        let market = daily("market_cycle", 0, &[0.4]);
        assert!(engine
            .compute(&market, &TimeSeries::empty("economic_cycle"))
            .is_empty());
        assert!(engine
            .compute(&TimeSeries::empty("market_cycle"), &market)
            .is_empty());
    }

    #[test]
    fn disjoint_cycles_yield_empty_gri() {
        let config = AnalysisConfig::default();
        let engine = GriEngine::new(&config);
        let market = daily("market_cycle", 0, &[0.4, 0.4]);
        let economic = daily("economic_cycle", 10, &[0.2, 0.2]);
        assert!(engine.compute(&market, &economic).is_empty());
    }

    #[test]
    fn gri_is_clipped_to_unit_interval() {
        let config = AnalysisConfig::default();
        let engine = GriEngine::new(&config);
        let market = daily("market_cycle", 0, &[3.0, -3.0]);
        let economic = daily("economic_cycle", 0, &[3.0, -3.0]);
        let gri = engine.compute(&market, &economic);
        assert_eq!(gri.values(), &[1.0, -1.0]);
    }

    #[test]
    fn classification_thresholds() {
        let config = AnalysisConfig::default();
        assert_eq!(classify(&config, 0.11), Stance::Aggressive);
        assert_eq!(classify(&config, 0.1), Stance::Neutral);
        assert_eq!(classify(&config, -0.1), Stance::Neutral);
        assert_eq!(classify(&config, -0.11), Stance::Defensive);
        assert_eq!(classify(&config, f64::NAN), Stance::Neutral);
    }
}
