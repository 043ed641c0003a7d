//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while executing or sampling a state vector.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A gate or qubit list failed IR validation.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qnav_ir::IrError),

    /// Width, shot count or qubit selection is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Outcome probabilities do not sum to one.
    #[error("State is not normalized: probabilities sum to {total}")]
    NumericInvariantViolation {
        /// Observed sum of squared amplitude magnitudes.
        total: f64,
    },
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
