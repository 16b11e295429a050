//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The job type is neither `SAMPLE` nor `OBS`.
    #[error("Invalid job type '{0}', expected SAMPLE or OBS")]
    InvalidJobType(String),

    /// The observable matrix is malformed.
    #[error("Invalid observable: {0}")]
    InvalidObservable(String),

    /// Program exceeds engine capabilities.
    #[error("Program exceeds engine capabilities: {0}")]
    CircuitTooLarge(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Job submission failed.
    #[error("Job submission failed: {0}")]
    SubmissionFailed(String),

    /// Generic engine error.
    #[error("Engine error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
