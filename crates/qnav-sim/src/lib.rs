//! qnav state-vector simulator.
//!
//! Holds the full `2^n` amplitude vector of a register, applies [`GateOp`]s
//! to it in place and draws measurement outcomes from it.
//!
//! # Example
//!
//! ```rust
//! use qnav_ir::{CircuitProgram, QubitId};
//! use qnav_sim::{Sampler, run};
//!
//! let mut program = CircuitProgram::new("bell", 2);
//! program.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//!
//! let state = run(&program)?;
//! let counts = Sampler::seeded(7).sample(&state, 1000)?;
//! assert_eq!(counts.count(0b00) + counts.count(0b11), 1000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`GateOp`]: qnav_ir::GateOp

pub mod error;
pub mod executor;
pub mod sampler;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use executor::{run, run_on};
pub use sampler::{Sampler, ShotHistogram, probabilities};
pub use statevector::StateVector;

/// Largest register the simulator will allocate.
pub const MAX_QUBITS: usize = 24;

/// Allowed deviation of the probability sum from one before sampling.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-6;
