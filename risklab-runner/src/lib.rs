//! Risklab Runner — run orchestration on top of `risklab-core`.
//!
//! This crate wraps the engine with everything a scheduled or ad-hoc
//! run needs:
//! - Wide-CSV table loading with per-cell missing values
//! - A provider chain with ordered fallback and a synthetic debug mode
//! - TOML run configuration with content-hash run ids
//! - Artifact export (JSON snapshot, CSV histories, text/HTML reports)

pub mod config;
pub mod data_loader;
pub mod export;
pub mod reporting;
pub mod runner;

pub use config::{ConfigError, RunConfig};
pub use data_loader::{
    dataset_hash, fetch_with_fallback, load_table_csv, synthetic_table, LoadError, ProviderError,
    SeriesProvider,
};
pub use export::{
    export_acri_csv, export_gri_csv, export_ranking_csv, export_signals_csv,
    export_snapshot_json, save_artifacts,
};
pub use reporting::{html_report, text_report};
pub use runner::{load_input, run_analysis, RunError, RunOutput};
