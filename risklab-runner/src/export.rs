//! Artifact export — JSON snapshot and CSV histories.
//!
//! Every run can persist a bundle under `{output_dir}/run_{as_of}/`:
//! - `snapshot.json` — latest-state summary for downstream consumers
//! - `gri_history.csv` — cycles and GRI per date
//! - `interpreter_signals.csv` — the interpreter's dated signal rows
//! - `acri_history.csv` — wide per-class indicator history
//! - `acri_ranking.csv` — the positioning ranking
//! - `report.txt` / `report.html` — human-readable reports

use anyhow::{Context, Result};
use risklab_core::{AnalysisReport, RankingEntry, SignalRow, Snapshot, TimeSeries};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::reporting;

/// Serialize a snapshot to pretty JSON.
pub fn export_snapshot_json(snapshot: &Snapshot) -> Result<String> {
    serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot to JSON")
}

/// GRI history as CSV: date, market cycle, economic cycle, GRI.
///
/// Rows follow the GRI's axis; cycle cells are empty where a cycle has
/// no value on that date.
pub fn export_gri_csv(report: &AnalysisReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "market_cycle", "economic_cycle", "gri"])?;
    for (date, gri) in report.gri.valid() {
        wtr.write_record([
            date.to_string(),
            opt_cell(report.market_cycle.get(date)),
            opt_cell(report.economic_cycle.get(date)),
            format!("{gri:.6}"),
        ])?;
    }
    finish(wtr)
}

/// Interpreter rows as CSV with all sub-signals and the decision.
pub fn export_signals_csv(signals: &[SignalRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "date",
        "gri",
        "gri_stance",
        "momentum",
        "trend",
        "seasonality",
        "consensus",
        "decision",
        "label",
    ])?;
    for row in signals {
        wtr.write_record([
            row.date.to_string(),
            format!("{:.6}", row.gri),
            row.gri_stance.to_string(),
            row.momentum.to_string(),
            row.trend.to_string(),
            row.seasonality.to_string(),
            row.consensus.to_string(),
            row.decision.to_string(),
            row.label.label().to_string(),
        ])?;
    }
    finish(wtr)
}

/// Per-class indicator history as wide CSV over the union date axis.
pub fn export_acri_csv(indicators: &BTreeMap<String, TimeSeries>) -> Result<String> {
    let mut axis = BTreeSet::new();
    for series in indicators.values() {
        axis.extend(series.dates().iter().copied());
    }

    let mut wtr = csv::Writer::from_writer(vec![]);
    let mut header = vec!["date".to_string()];
    header.extend(indicators.keys().cloned());
    wtr.write_record(&header)?;

    for date in axis {
        let mut row = vec![date.to_string()];
        for series in indicators.values() {
            row.push(opt_cell(series.get(date)));
        }
        wtr.write_record(&row)?;
    }
    finish(wtr)
}

/// The positioning ranking as CSV, best class first.
pub fn export_ranking_csv(ranking: &[RankingEntry]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["rank", "class", "name", "value", "position", "description"])?;
    for (i, entry) in ranking.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            entry.class_key.clone(),
            entry.class_name.clone(),
            format!("{:.4}", entry.value),
            entry.position.label().to_string(),
            entry.description.clone(),
        ])?;
    }
    finish(wtr)
}

/// Save the full artifact bundle for one run.
///
/// Returns the path of the created `run_{as_of}` directory.
pub fn save_artifacts(
    report: &AnalysisReport,
    snapshot: &Snapshot,
    output_dir: &Path,
) -> Result<PathBuf> {
    let run_dir = output_dir.join(format!("run_{}", report.as_of));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    std::fs::write(run_dir.join("snapshot.json"), export_snapshot_json(snapshot)?)?;
    std::fs::write(run_dir.join("gri_history.csv"), export_gri_csv(report)?)?;
    std::fs::write(run_dir.join("interpreter_signals.csv"), export_signals_csv(&report.signals)?)?;
    std::fs::write(run_dir.join("acri_history.csv"), export_acri_csv(&report.acri)?)?;
    std::fs::write(run_dir.join("acri_ranking.csv"), export_ranking_csv(&report.ranking)?)?;
    std::fs::write(run_dir.join("report.txt"), reporting::text_report(snapshot))?;
    std::fs::write(run_dir.join("report.html"), reporting::html_report(snapshot))?;

    Ok(run_dir)
}

fn opt_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}
