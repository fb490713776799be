//! Serializable run configuration.
//!
//! One TOML file captures everything a run needs: the analysis
//! parameters, where the input CSV lives, and where artifacts go.
//! Every field has a default, so an empty file is a valid config.

use risklab_core::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Full configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Engine parameters (weights, windows, thresholds).
    pub analysis: AnalysisConfig,

    /// Wide CSV with the input table. `None` means synthetic data.
    pub data_file: Option<PathBuf>,

    /// Directory artifacts are written under.
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            data_file: None,
            output_dir: PathBuf::from("artifacts"),
        }
    }
}

impl RunConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share an id, which makes output
    /// directories and run logs comparable across machines.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("RunConfig serializes");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"").unwrap();
        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.analysis.market_weight, 0.5);
    }

    #[test]
    fn partial_toml_overrides_selected_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"output_dir = \"out\"\n\n[analysis]\nmarket_weight = 0.7\neconomic_weight = 0.3\n",
        )
        .unwrap();
        let config = RunConfig::load(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.analysis.market_weight, 0.7);
        assert_eq!(config.analysis.economic_weight, 0.3);
        // Untouched fields keep their defaults.
        assert_eq!(config.analysis.momentum_window, 90);
    }

    #[test]
    fn bad_toml_reports_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"analysis = 3").unwrap();
        let err = RunConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn run_id_is_stable_and_content_sensitive() {
        let a = RunConfig::default();
        let b = RunConfig::default();
        assert_eq!(a.run_id(), b.run_id());

        let mut c = RunConfig::default();
        c.analysis.market_weight = 0.6;
        assert_ne!(a.run_id(), c.run_id());
    }
}
