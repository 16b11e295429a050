//! Error types for the execution backend.

use qlm_hal::HalError;
use qlm_ir::IrError;
use qlm_translate::TranslateError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running circuits or measurements.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// The backend was constructed with an unusable configuration.
    #[error("Invalid backend configuration: {0}")]
    InvalidConfiguration(String),

    /// Loading configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The circuit is malformed.
    #[error("Invalid circuit: {0}")]
    Ir(#[from] IrError),

    /// Translation aborted.
    #[error("Translation failed: {0}")]
    Translate(#[from] TranslateError),

    /// The engine rejected or failed the job.
    #[error(transparent)]
    Engine(#[from] HalError),

    /// A measurement could not be evaluated from the collected registers.
    #[error("Measurement evaluation failed: {0}")]
    Evaluation(String),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
