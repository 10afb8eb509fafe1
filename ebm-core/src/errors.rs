use thiserror::Error;

use crate::FloatValue;

/// Error type for invalid model operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EBMError {
    #[error("Number of latitude bands must be positive, got {num_bands}")]
    InvalidBandCount { num_bands: usize },
    #[error("Starting temperatures must have one value per band. Expected {expected}, got {got}")]
    TemperatureLengthMismatch { expected: usize, got: usize },
    #[error("Invalid solar multiplier range: min={min}, max={max}. Bounds must be finite with max > min")]
    InvalidSweepRange { min: FloatValue, max: FloatValue },
    #[error("Solar multiplier step must be finite and positive, got {step}")]
    InvalidStep { step: FloatValue },
    #[error("Failed to converge after {iterations} iterations (solar multiplier={solar_multiplier}, last max temperature change={max_difference})")]
    ConvergenceFailure {
        iterations: usize,
        solar_multiplier: FloatValue,
        max_difference: FloatValue,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EBMError {
    /// Whether the error stems from invalid caller input rather than the
    /// numerical behaviour of the model.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, EBMError::ConvergenceFailure { .. })
    }
}

/// Convenience type for `Result<T, EBMError>`.
pub type EBMResult<T> = Result<T, EBMError>;
