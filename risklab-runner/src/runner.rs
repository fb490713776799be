//! Run orchestration: input resolution, pipeline execution, artifacts.

use crate::config::RunConfig;
use crate::data_loader::{self, LoadError};
use crate::export;
use chrono::NaiveDate;
use log::{info, warn};
use risklab_core::{AnalysisReport, PipelineError, RiskPipeline, Snapshot, TimeSeriesTable};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from a full run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to save artifacts: {0}")]
    Export(#[from] anyhow::Error),
}

/// Everything a completed run hands back to the caller.
#[derive(Debug)]
pub struct RunOutput {
    pub report: AnalysisReport,
    pub snapshot: Snapshot,
    /// BLAKE3 fingerprint of the input table.
    pub dataset_hash: String,
    /// Where the artifact bundle was written, when saving was requested.
    pub artifacts_dir: Option<PathBuf>,
}

/// Resolve the input table for a run.
///
/// A configured data file is loaded as-is; without one, a deterministic
/// synthetic table over every cataloged variable is generated (and
/// loudly flagged — synthetic data is a development mode).
pub fn load_input(
    config: &RunConfig,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<TimeSeriesTable, LoadError> {
    match &config.data_file {
        Some(path) => {
            info!("loading input table from {}", path.display());
            data_loader::load_table_csv(path)
        }
        None => {
            warn!("no data file configured, generating synthetic data from {start} to {end}");
            let codes: Vec<&str> = risklab_core::catalog::variables()
                .iter()
                .map(|def| def.code)
                .collect();
            Ok(data_loader::synthetic_table(&codes, start, end))
        }
    }
}

/// Run the full analysis over a resolved table.
///
/// `as_of` defaults to the table's latest date. With `save` set, the
/// artifact bundle is written under the configured output directory.
pub fn run_analysis(
    config: &RunConfig,
    table: &TimeSeriesTable,
    as_of: Option<NaiveDate>,
    save: bool,
) -> Result<RunOutput, RunError> {
    let dataset_hash = data_loader::dataset_hash(table);
    info!(
        "run {}: {} series, dataset {}",
        &config.run_id()[..12],
        table.len(),
        &dataset_hash[..12]
    );

    let pipeline = RiskPipeline::new(config.analysis.clone());
    let report = pipeline.run(table, as_of)?;
    let snapshot = Snapshot::from_report(&report, pipeline.config());

    let artifacts_dir = if save {
        let dir = export::save_artifacts(&report, &snapshot, &config.output_dir)?;
        info!("artifacts written to {}", dir.display());
        Some(dir)
    } else {
        None
    };

    Ok(RunOutput {
        report,
        snapshot,
        dataset_hash,
        artifacts_dir,
    })
}
