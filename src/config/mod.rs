// src/config/mod.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_VECTOR_LENGTH: usize = 1024;
pub const DEFAULT_RING_CAPACITY: usize = 16384;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub processor: ProcessorConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProcessorConfig {
    /// Echo diagnostics to the console in addition to the log facade.
    #[serde(default)]
    pub verbose: bool,
}

/// Detector operating mode. Only changes the label reported on the console.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Monitor,
    Detect,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Monitor => "Monitor",
            Mode::Detect => "Detect",
        }
    }
}

impl From<i32> for Mode {
    fn from(code: i32) -> Self {
        if code == 0 {
            Mode::Monitor
        } else {
            Mode::Detect
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DetectorConfig {
    pub vector_length: usize,
    pub n_sigma: f32,
    pub frequency_mhz: f32,
    pub bandwidth_mhz: f32,
    pub integration_time_s: f32,
    pub mode: Mode,
    pub ring_capacity: usize,
    pub scan_lag: Option<usize>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let bandwidth_mhz = 6.0;
        Self {
            vector_length: DEFAULT_VECTOR_LENGTH,
            n_sigma: 5.0,
            frequency_mhz: 1420.4,
            bandwidth_mhz,
            integration_time_s: DEFAULT_VECTOR_LENGTH as f32 * 1.0e-6 / bandwidth_mhz,
            mode: Mode::Monitor,
            ring_capacity: DEFAULT_RING_CAPACITY,
            scan_lag: None,
        }
    }
}

impl DetectorConfig {
    /// Samples the scan cursor trails the newest written sample.
    pub fn effective_scan_lag(&self) -> usize {
        self.scan_lag.unwrap_or(self.vector_length / 2)
    }

    /// Checks the structural limits that size the detector's buffers.
    /// Detection parameters (`n_sigma`, `bandwidth_mhz`) are accepted as given.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vector_length == 0 {
            return Err(ConfigError::Invalid(
                "vector_length must be positive".to_string(),
            ));
        }
        if self.ring_capacity <= self.vector_length {
            return Err(ConfigError::Invalid(format!(
                "ring_capacity ({}) must exceed vector_length ({})",
                self.ring_capacity, self.vector_length
            )));
        }
        let scan_lag = self.effective_scan_lag();
        if scan_lag >= self.ring_capacity {
            return Err(ConfigError::Invalid(format!(
                "scan_lag ({}) must be less than ring_capacity ({})",
                scan_lag, self.ring_capacity
            )));
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    config.detector.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<(), ConfigError> {
    let yaml = serde_yaml::to_string(config)?;
    fs::write(path, yaml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_yaml_uses_defaults() {
        let yaml = "
processor:
  verbose: true
detector:
  vector_length: 64
  n_sigma: 4.5
  mode: detect
  ring_capacity: 1024
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.processor.verbose);
        assert_eq!(config.detector.vector_length, 64);
        assert_eq!(config.detector.n_sigma, 4.5);
        assert_eq!(config.detector.mode, Mode::Detect);
        assert_eq!(config.detector.ring_capacity, 1024);
        assert_eq!(config.detector.scan_lag, None);
        assert_eq!(config.detector.effective_scan_lag(), 32);
        assert_eq!(config.detector.bandwidth_mhz, 6.0);
        assert!(config.detector.validate().is_ok());
    }

    #[test]
    fn test_mode_from_code() {
        assert_eq!(Mode::from(0), Mode::Monitor);
        assert_eq!(Mode::from(1), Mode::Detect);
        assert_eq!(Mode::from(-3), Mode::Detect);
        assert_eq!(Mode::Detect.label(), "Detect");
    }

    #[test]
    fn test_validate_rejects_structural_errors() {
        let mut config = DetectorConfig {
            vector_length: 0,
            ..DetectorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.vector_length = 64;
        config.ring_capacity = 64;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.ring_capacity = 128;
        config.scan_lag = Some(128);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.scan_lag = Some(127);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_degenerate_thresholds() {
        let config = DetectorConfig {
            n_sigma: -2.0,
            bandwidth_mhz: 0.0,
            ..DetectorConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_config() {
        let path = std::env::temp_dir().join(format!(
            "radio_astro_detect_config_{}.yaml",
            std::process::id()
        ));
        let mut config = Config::default();
        config.detector.vector_length = 256;
        config.detector.scan_lag = Some(100);

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.detector.vector_length, 256);
        assert_eq!(loaded.detector.scan_lag, Some(100));
        assert_eq!(loaded.detector.mode, Mode::Monitor);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_config("/nonexistent/radio_astro_detect.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
