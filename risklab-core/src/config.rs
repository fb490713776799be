//! Analysis configuration.
//!
//! One explicit value object constructed at startup and passed by
//! reference into every engine — there is no ambient global state. The
//! cycle weights and blend ratios are fixed business constants carried
//! over from the methodology; the defaults reproduce them exactly.

use serde::{Deserialize, Serialize};

/// Parameters for the full GRI / interpreter / ACRI pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Weight of the market cycle in the GRI blend.
    pub market_weight: f64,
    /// Weight of the economic cycle in the GRI blend.
    pub economic_weight: f64,

    /// GRI values above this classify AGGRESSIVE.
    pub aggressive_threshold: f64,
    /// GRI values below this classify DEFENSIVE.
    pub defensive_threshold: f64,

    /// Observation window for the interpreter's momentum difference.
    pub momentum_window: usize,
    /// Fast moving-average window for the trend sub-signal.
    pub trend_fast_window: usize,
    /// Slow moving-average window for the trend sub-signal.
    pub trend_slow_window: usize,
    /// Years of monthly history for the seasonality sub-signal.
    pub seasonality_years: u32,

    /// Weight of the class-specific signal in the ACRI blend.
    pub acri_specific_weight: f64,
    /// Weight of the global GRI in the ACRI blend.
    pub acri_global_weight: f64,

    /// Rolling window for the dynamic Bollinger bands.
    pub band_window: usize,
    /// Band half-width in standard deviations.
    pub band_width: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            market_weight: 0.5,
            economic_weight: 0.5,
            aggressive_threshold: 0.1,
            defensive_threshold: -0.1,
            momentum_window: 90,
            trend_fast_window: 50,
            trend_slow_window: 200,
            seasonality_years: 25,
            acri_specific_weight: 0.6,
            acri_global_weight: 0.4,
            band_window: 20,
            band_width: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_methodology_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.market_weight, 0.5);
        assert_eq!(config.economic_weight, 0.5);
        assert_eq!(config.aggressive_threshold, 0.1);
        assert_eq!(config.acri_specific_weight, 0.6);
        assert_eq!(config.acri_global_weight, 0.4);
        assert_eq!(config.momentum_window, 90);
        assert_eq!(config.seasonality_years, 25);
    }

    #[test]
    fn partial_deserialization_fills_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"market_weight": 0.7}"#).unwrap();
        assert_eq!(config.market_weight, 0.7);
        assert_eq!(config.economic_weight, 0.5);
    }
}
