//! Circuit generators for the navigation algorithms.

pub mod grover;
pub mod phase_estimation;
pub mod superposition;
pub mod vqe;

pub use grover::{IterationFormula, grover_circuit};
pub use phase_estimation::{counting_register, phase_estimation_circuit};
pub use superposition::superposition_circuit;
pub use vqe::{hardware_efficient_ansatz, num_parameters};

use crate::error::{AlgoError, AlgoResult};
use qnav_sim::MAX_QUBITS;

/// Reject register widths the simulator cannot hold.
pub(crate) fn check_register_width(num_qubits: usize) -> AlgoResult<()> {
    if num_qubits == 0 || num_qubits > MAX_QUBITS {
        return Err(AlgoError::InvalidConfiguration(format!(
            "register width must be between 1 and {MAX_QUBITS}, got {num_qubits}"
        )));
    }
    Ok(())
}
