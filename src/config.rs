// src/config.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_CALIBRATION_BINS, DEFAULT_DPI, DEFAULT_EMERGENCE_THRESHOLD,
    DEFAULT_RESULTS_DIR, DEFAULT_SEED,
};
use crate::error::{FigureError, Result};

/// Rendering settings. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// UCS entropy penalty.
    #[serde(default = "FigureConfig::default_alpha")]
    pub alpha: f64,
    #[serde(default = "FigureConfig::default_dpi")]
    pub dpi: u32,
    /// Seed of every synthetic data generator.
    #[serde(default = "FigureConfig::default_seed")]
    pub seed: u64,
    #[serde(default = "FigureConfig::default_calibration_bins")]
    pub calibration_bins: usize,
    #[serde(default = "FigureConfig::default_output_dir")]
    pub output_dir: PathBuf,
    /// Relative to `output_dir`.
    #[serde(default = "FigureConfig::default_results_dir")]
    pub results_dir: PathBuf,
    /// Default tau of the `emergent` command.
    #[serde(default = "FigureConfig::default_emergence_threshold")]
    pub emergence_threshold: f64,
}

impl FigureConfig {
    fn default_alpha() -> f64 {
        DEFAULT_ALPHA
    }
    fn default_dpi() -> u32 {
        DEFAULT_DPI
    }
    fn default_seed() -> u64 {
        DEFAULT_SEED
    }
    fn default_calibration_bins() -> usize {
        DEFAULT_CALIBRATION_BINS
    }
    fn default_output_dir() -> PathBuf {
        PathBuf::from(".")
    }
    fn default_results_dir() -> PathBuf {
        PathBuf::from(DEFAULT_RESULTS_DIR)
    }
    fn default_emergence_threshold() -> f64 {
        DEFAULT_EMERGENCE_THRESHOLD
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: FigureConfig = toml::from_str(&contents).map_err(|e| FigureError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validated(path)
    }

    /// Config from `path`, or the defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                debug!(path = %path.display(), ?config, "loaded config");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring config file, using defaults");
                Self::default()
            }
        }
    }

    fn validated(self, path: &Path) -> Result<Self> {
        let problem = if !self.alpha.is_finite() || self.alpha < 0.0 {
            Some("alpha must be a non-negative number")
        } else if self.dpi == 0 {
            Some("dpi must be positive")
        } else if self.calibration_bins == 0 {
            Some("calibration_bins must be positive")
        } else if !self.emergence_threshold.is_finite() || self.emergence_threshold < 0.0 {
            Some("emergence_threshold must be a non-negative number")
        } else {
            None
        };
        match problem {
            Some(message) => Err(FigureError::Config {
                path: path.to_path_buf(),
                message: message.to_string(),
            }),
            None => Ok(self),
        }
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            alpha: Self::default_alpha(),
            dpi: Self::default_dpi(),
            seed: Self::default_seed(),
            calibration_bins: Self::default_calibration_bins(),
            output_dir: Self::default_output_dir(),
            results_dir: Self::default_results_dir(),
            emergence_threshold: Self::default_emergence_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figures.toml");
        fs::write(&path, "alpha = 0.5\ndpi = 100\n").unwrap();
        let config = FigureConfig::from_file(&path).unwrap();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.dpi, 100);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.results_dir, PathBuf::from(DEFAULT_RESULTS_DIR));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FigureConfig::load_or_default(&dir.path().join("absent.toml"));
        assert_eq!(config, FigureConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "alpha = [not toml").unwrap();
        assert!(matches!(FigureConfig::from_file(&path), Err(FigureError::Config { .. })));
        assert_eq!(FigureConfig::load_or_default(&path), FigureConfig::default());
    }

    #[test]
    fn test_threshold_above_one_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tau.toml");
        fs::write(&path, "alpha = 0.5\ndpi = 100\nemergence_threshold = 1.5\n").unwrap();
        let config = FigureConfig::load_or_default(&path);
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.dpi, 100);
        assert_eq!(config.emergence_threshold, 1.5);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("neg.toml");
        fs::write(&path, "alpha = -1.0\n").unwrap();
        assert!(FigureConfig::from_file(&path).is_err());
        fs::write(&path, "calibration_bins = 0\n").unwrap();
        assert!(FigureConfig::from_file(&path).is_err());
        fs::write(&path, "emergence_threshold = -0.1\n").unwrap();
        assert!(FigureConfig::from_file(&path).is_err());
    }
}

// src/config.rs
