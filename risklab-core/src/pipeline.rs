//! Full pipeline orchestration.
//!
//! One entry point runs cycles → GRI → interpreter → ACRI → bands in
//! order and collects everything into a report. Engines degrade
//! individually (an unavailable cycle or sub-signal produces an empty
//! series and a log line); the only fatal condition is an input table
//! with no series at all.

use crate::acri::{AcriEngine, RankingEntry};
use crate::bands::BollingerBands;
use crate::config::AnalysisConfig;
use crate::cycles::{EconomicCycleEngine, MarketCycleEngine};
use crate::domain::{Stance, TimeSeries, TimeSeriesTable};
use crate::gri::{classify, GriEngine};
use crate::interpreter::{InterpreterEngine, SignalRow};
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors from a full pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input table has no series")]
    EmptyTable,

    #[error("input table has no observations")]
    NoObservations,
}

/// Everything one pipeline run produces.
#[derive(Debug)]
pub struct AnalysisReport {
    pub as_of: NaiveDate,
    pub market_cycle: TimeSeries,
    pub economic_cycle: TimeSeries,
    pub gri: TimeSeries,
    pub signals: Vec<SignalRow>,
    pub acri: BTreeMap<String, TimeSeries>,
    pub ranking: Vec<RankingEntry>,
    pub bands: BollingerBands,
}

/// Latest-state summary of a report, shaped for serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub as_of: NaiveDate,
    pub gri: Option<f64>,
    pub stance: Stance,
    pub market_cycle: Option<f64>,
    pub economic_cycle: Option<f64>,
    pub latest_signal: Option<SignalRow>,
    pub ranking: Vec<RankingEntry>,
}

impl Snapshot {
    pub fn from_report(report: &AnalysisReport, config: &AnalysisConfig) -> Self {
        let gri = report.gri.last_valid().map(|(_, v)| v);
        Self {
            as_of: report.as_of,
            gri,
            stance: gri.map_or(Stance::Neutral, |v| classify(config, v)),
            market_cycle: report.market_cycle.last_valid().map(|(_, v)| v),
            economic_cycle: report.economic_cycle.last_valid().map(|(_, v)| v),
            latest_signal: report.signals.last().cloned(),
            ranking: report.ranking.clone(),
        }
    }
}

/// Orchestrates the whole analysis over one input table.
#[derive(Debug, Clone, Default)]
pub struct RiskPipeline {
    config: AnalysisConfig,
}

impl RiskPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run everything. `as_of` defaults to the table's latest date and
    /// anchors the seasonality history cutoff.
    pub fn run(
        &self,
        table: &TimeSeriesTable,
        as_of: Option<NaiveDate>,
    ) -> Result<AnalysisReport, PipelineError> {
        if table.is_empty() {
            return Err(PipelineError::EmptyTable);
        }
        let as_of = match as_of.or_else(|| table.date_axis().last().copied()) {
            Some(date) => date,
            None => return Err(PipelineError::NoObservations),
        };
        info!("pipeline: {} series, as of {as_of}", table.len());

        let market_cycle = MarketCycleEngine::new().compute(table);
        let economic_cycle = EconomicCycleEngine::new().compute(table);
        let gri = GriEngine::new(&self.config).compute(&market_cycle, &economic_cycle);
        let signals = InterpreterEngine::new(&self.config).run(&gri, table, as_of);

        let acri_engine = AcriEngine::new(&self.config);
        let acri = acri_engine.compute_all(table, &gri);
        let ranking = acri_engine.ranking(&acri);

        let bands = BollingerBands::compute(&gri, self.config.band_window, self.config.band_width);

        info!(
            "pipeline: done ({} gri obs, {} signal rows, {} ranked classes)",
            gri.len(),
            signals.len(),
            ranking.len()
        );
        Ok(AnalysisReport {
            as_of,
            market_cycle,
            economic_cycle,
            gri,
            signals,
            acri,
            ranking,
            bands,
        })
    }
}
