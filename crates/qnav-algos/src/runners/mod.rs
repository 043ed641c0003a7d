//! Runners that build, execute and measure each algorithm.

pub mod annealing;
pub mod grover;
pub mod phase_estimation;
pub mod superposition;
pub mod vqe;

pub use annealing::{AnnealingResult, QuantumAnnealer};
pub use grover::{GroverResult, GroverSearch};
pub use phase_estimation::{PhaseEstimationResult, PhaseEstimator};
pub use superposition::SuperpositionRunner;
pub use vqe::{OptimizationTrace, TraceStep, VqeResult, VqeRunner, evaluate_energy};
