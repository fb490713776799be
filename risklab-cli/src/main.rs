//! Risklab CLI — run the analysis and inspect the current signal.
//!
//! Commands:
//! - `run` — full pipeline run with artifact export
//! - `snapshot` — print the current signal as a text report or JSON

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use risklab_runner::{load_input, run_analysis, text_report, RunConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "risklab", about = "Composite macro risk-signal analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and save the artifact bundle.
    Run {
        /// Path to a TOML config file. Defaults are used without one.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Input CSV (overrides the config's data file).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Analysis date (YYYY-MM-DD). Defaults to the latest data date.
        #[arg(long)]
        as_of: Option<String>,

        /// Output directory for the artifact bundle.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Synthetic data start date when no input file is configured.
        #[arg(long, default_value = "2005-01-01")]
        start: String,

        /// Synthetic data end date when no input file is configured.
        #[arg(long)]
        end: Option<String>,
    },
    /// Run the pipeline and print the current signal without saving.
    Snapshot {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Input CSV (overrides the config's data file).
        #[arg(long)]
        data: Option<PathBuf>,

        /// Print JSON instead of the text report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data,
            as_of,
            output_dir,
            start,
            end,
        } => {
            let mut config = load_config(config)?;
            if let Some(data) = data {
                config.data_file = Some(data);
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            let start = parse_date(&start)?;
            let end = match end {
                Some(s) => parse_date(&s)?,
                None => chrono::Local::now().date_naive(),
            };
            let as_of = as_of.as_deref().map(parse_date).transpose()?;

            let table = load_input(&config, start, end)?;
            let output = run_analysis(&config, &table, as_of, true)?;

            print!("{}", text_report(&output.snapshot));
            if let Some(dir) = &output.artifacts_dir {
                println!("artifacts: {}", dir.display());
            }
            println!("dataset:   {}", &output.dataset_hash[..16]);
        }
        Commands::Snapshot { config, data, json } => {
            let mut config = load_config(config)?;
            if let Some(data) = data {
                config.data_file = Some(data);
            }
            let start = parse_date("2005-01-01")?;
            let end = chrono::Local::now().date_naive();

            let table = load_input(&config, start, end)?;
            let output = run_analysis(&config, &table, None, false)?;

            if json {
                println!("{}", risklab_runner::export_snapshot_json(&output.snapshot)?);
            } else {
                print!("{}", text_report(&output.snapshot));
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(RunConfig::default()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}
