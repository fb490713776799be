//! Risklab Core — composite macro risk-signal engine.
//!
//! This crate contains the heart of the analysis pipeline:
//! - Domain types (date-indexed time series, series tables, stances)
//! - Variable and asset-class catalogs with explicit polarity tags
//! - Rolling z-score normalization (the universal signal building block)
//! - Weighted component aggregation with gap-capped time interpolation
//! - Market-cycle and economic-cycle engines
//! - Global Risk Indicator (GRI) blending and classification
//! - Interpreter (momentum / trend / seasonality consensus voting)
//! - Per-asset-class risk indicator (ACRI) with five-level positions
//! - Volatility-adaptive Bollinger bands over the GRI
//!
//! All engines are synchronous batch computations over an immutable
//! in-memory table. Per-signal failures degrade to empty series; only a
//! table with zero columns is fatal to a full pipeline run.

pub mod acri;
pub mod aggregate;
pub mod bands;
pub mod catalog;
pub mod config;
pub mod cycles;
pub mod domain;
pub mod gri;
pub mod interpreter;
pub mod normalize;
pub mod pipeline;

pub use acri::{AcriEngine, RankingEntry};
pub use aggregate::WeightedComponent;
pub use bands::BollingerBands;
pub use config::AnalysisConfig;
pub use cycles::{EconomicCycleEngine, MarketCycleEngine};
pub use domain::{PositionBand, Stance, TimeSeries, TimeSeriesTable};
pub use gri::GriEngine;
pub use interpreter::{InterpreterEngine, SignalRow};
pub use pipeline::{AnalysisReport, PipelineError, RiskPipeline, Snapshot};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all pipeline output types are Send + Sync.
    ///
    /// The per-class ACRI loop runs on rayon, so everything crossing that
    /// boundary must be thread-safe. If any type fails this check, the
    /// build breaks immediately.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::TimeSeries>();
        require_sync::<domain::TimeSeries>();
        require_send::<domain::TimeSeriesTable>();
        require_sync::<domain::TimeSeriesTable>();
        require_send::<domain::Stance>();
        require_sync::<domain::Stance>();
        require_send::<domain::PositionBand>();
        require_sync::<domain::PositionBand>();
        require_send::<interpreter::SignalRow>();
        require_sync::<interpreter::SignalRow>();
        require_send::<acri::RankingEntry>();
        require_sync::<acri::RankingEntry>();
        require_send::<pipeline::AnalysisReport>();
        require_sync::<pipeline::AnalysisReport>();
        require_send::<config::AnalysisConfig>();
        require_sync::<config::AnalysisConfig>();
    }
}
