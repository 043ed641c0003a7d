//! Error types for the algorithm crate.

use thiserror::Error;

/// Errors produced while configuring or running an algorithm.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// Circuit construction failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qnav_ir::IrError),

    /// Simulation or sampling failed.
    #[error("Simulation error: {0}")]
    Sim(#[from] qnav_sim::SimError),

    /// Parameters were rejected before any simulation ran.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for algorithm operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
