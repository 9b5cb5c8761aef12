//! Daemon configuration loaded from environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hydrogrow_core::error::CoreError;
use hydrogrow_core::monitoring::AlertThresholdConfig;
use hydrogrow_core::telemetry::TimePeriod;

/// Default cadence of the sampling loop.
const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Monitor configuration.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Time between sensor samples.
    pub sample_interval: Duration,
    /// Threshold file; built-in defaults are used when absent.
    pub alert_config_path: Option<PathBuf>,
    /// Seed for the sensor simulator. OS entropy when absent.
    pub sensor_seed: Option<u64>,
    /// Period summarised in the startup report.
    pub history_period: TimePeriod,
}

impl MonitorConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `SAMPLE_INTERVAL_SECS` | `5`     |
    /// | `ALERT_CONFIG_PATH`    | unset   |
    /// | `SENSOR_SEED`          | unset   |
    /// | `HISTORY_PERIOD`       | `24h`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sample_interval_secs = match lookup("SAMPLE_INTERVAL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SAMPLE_INTERVAL_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_SAMPLE_INTERVAL_SECS,
        };

        let alert_config_path = lookup("ALERT_CONFIG_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let sensor_seed = lookup("SENSOR_SEED")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                    var: "SENSOR_SEED",
                    value: raw,
                })
            })
            .transpose()?;

        let history_period = match lookup("HISTORY_PERIOD") {
            Some(raw) => raw.parse::<TimePeriod>().map_err(|_| ConfigError::Invalid {
                var: "HISTORY_PERIOD",
                value: raw,
            })?,
            None => TimePeriod::Day,
        };

        Ok(Self {
            sample_interval: Duration::from_secs(sample_interval_secs),
            alert_config_path,
            sensor_seed,
            history_period,
        })
    }

    /// Resolve the alert thresholds: the configured file, or the defaults.
    pub fn load_thresholds(&self) -> Result<AlertThresholdConfig, ConfigError> {
        match &self.alert_config_path {
            Some(path) => load_thresholds_file(path),
            None => Ok(AlertThresholdConfig::default()),
        }
    }
}

/// Read and validate an `AlertThresholdConfig` JSON file.
pub fn load_thresholds_file(path: &Path) -> Result<AlertThresholdConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AlertThresholdConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(config.validated()?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
