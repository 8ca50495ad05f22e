//! Analysis defaults loaded from a JSON file.

use anyhow::{Context, Result};
use barstat_lib::Period;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Defaults applied when a command flag is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AnalysisConfig {
    /// Moving-average windows for `ma`.
    pub(crate) windows: Vec<usize>,
    /// Resampling period for `resample`.
    pub(crate) period: Period,
    /// Length of the default `interval` window, in calendar days.
    pub(crate) trailing_days: u64,
    /// Bin count for close histograms.
    pub(crate) close_bins: usize,
    /// Bin count for return histograms.
    pub(crate) return_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            windows: vec![50, 200],
            period: Period::Month,
            trailing_days: 365,
            close_bins: 30,
            return_bins: 50,
        }
    }
}

impl AnalysisConfig {
    /// Returns the per-user config file location.
    ///
    /// - Linux: `~/.config/barstat/config.json`
    /// - macOS: `~/Library/Application Support/barstat/config.json`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\barstat\config\config.json`
    pub(crate) fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "barstat").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads `explicit` if given, else the per-user file if it exists, else
    /// the built-in defaults.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"windows": [20], "period": "week"}"#).unwrap();

        assert_eq!(config.windows, vec![20]);
        assert_eq!(config.period, Period::Week);
        assert_eq!(config.trailing_days, 365);
        assert_eq!(config.return_bins, 50);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<AnalysisConfig, _> = serde_json::from_str(r#"{"window": 20}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"trailing_days": 90, "close_bins": 10}}"#).unwrap();

        let config = AnalysisConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.trailing_days, 90);
        assert_eq!(config.close_bins, 10);
        assert_eq!(config.windows, vec![50, 200]);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AnalysisConfig::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
