//! Interference circuit used for environment prediction.

use qnav_ir::{CircuitProgram, QubitId};
use std::f64::consts::PI;

use super::check_register_width;
use crate::error::AlgoResult;

/// Generate the superposition circuit.
///
/// Hadamard on every qubit, a phase of `q·π/n` on qubit `q`, then a CNOT
/// ladder `q → q+1`.
pub fn superposition_circuit(num_qubits: usize) -> AlgoResult<CircuitProgram> {
    check_register_width(num_qubits)?;
    let mut program = CircuitProgram::new("superposition", num_qubits);
    program.h_all()?;
    for q in 0..num_qubits {
        let phase = q as f64 * PI / num_qubits as f64;
        program.p(phase, QubitId::from(q))?;
    }
    for q in 0..num_qubits - 1 {
        program.cx(QubitId::from(q), QubitId::from(q + 1))?;
    }
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_superposition_structure() {
        let program = superposition_circuit(3).unwrap();
        let counts = program.gate_counts();
        assert_eq!(counts["h"], 3);
        assert_eq!(counts["p"], 3);
        assert_eq!(counts["cx"], 2);
    }

    #[test]
    fn test_single_qubit_has_no_ladder() {
        let program = superposition_circuit(1).unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(superposition_circuit(0).is_err());
    }
}
