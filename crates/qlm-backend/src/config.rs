//! Backend configuration.
//!
//! Configuration is loaded from, in increasing precedence:
//! 1. Default values
//! 2. A YAML file
//! 3. Environment variables (with the `QLM_` prefix)
//!
//! ```yaml
//! number_qubits: 2
//! number_measurements: 100
//! job_type: OBS
//! # row-major, each entry [re, im]
//! observable:
//!   - [[1.0, 0.0], [0.0, 0.0]]
//!   - [[0.0, 0.0], [-1.0, 0.0]]
//! apply_identity_to_idle: false
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Execution backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Size of the qubit register programs are allocated on.
    #[serde(default = "default_number_qubits")]
    pub number_qubits: usize,

    /// Shots per job. Zero asks the engine for the exact distribution.
    #[serde(default = "default_number_measurements")]
    pub number_measurements: u32,

    /// Job type: "SAMPLE" or "OBS". Checked when the backend is built.
    #[serde(default = "default_job_type")]
    pub job_type: String,

    /// Observable matrix rows for OBS jobs.
    #[serde(default)]
    pub observable: Option<Vec<Vec<Complex64>>>,

    /// Insert identities on qubits idle during each instruction.
    #[serde(default)]
    pub apply_identity_to_idle: bool,
}

fn default_number_qubits() -> usize {
    1
}

fn default_number_measurements() -> u32 {
    1
}

fn default_job_type() -> String {
    "SAMPLE".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            number_qubits: default_number_qubits(),
            number_measurements: default_number_measurements(),
            job_type: default_job_type(),
            observable: None,
            apply_identity_to_idle: false,
        }
    }
}

impl BackendConfig {
    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: BackendConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Environment variables:
    /// - `QLM_NUMBER_QUBITS`
    /// - `QLM_NUMBER_MEASUREMENTS`
    /// - `QLM_JOB_TYPE`
    /// - `QLM_IDENTITY_PADDING`: "true" or "false"
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an arbitrary key lookup.
    ///
    /// Values that fail to parse leave the field unchanged.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("QLM_NUMBER_QUBITS").and_then(|v| v.parse().ok()) {
            self.number_qubits = val;
        }
        if let Some(val) = lookup("QLM_NUMBER_MEASUREMENTS").and_then(|v| v.parse().ok()) {
            self.number_measurements = val;
        }
        if let Some(v) = lookup("QLM_JOB_TYPE") {
            self.job_type = v;
        }
        if let Some(val) = lookup("QLM_IDENTITY_PADDING").and_then(|v| v.parse().ok()) {
            self.apply_identity_to_idle = val;
        }
        self
    }

    /// Validate configuration values.
    ///
    /// The job type is not checked here; an unknown job type is rejected
    /// when the backend is constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "number_qubits must be greater than 0".to_string(),
            ));
        }

        if let Some(rows) = &self.observable {
            let n = rows.len();
            if n == 0 || rows.iter().any(|row| row.len() != n) {
                return Err(ConfigError::ValidationError(format!(
                    "observable must be a non-empty square matrix, got {n} rows"
                )));
            }
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
