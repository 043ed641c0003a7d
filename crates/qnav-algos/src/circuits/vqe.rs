//! VQE ansatz circuits.
//!
//! An ansatz is a parameterized quantum circuit used in variational
//! algorithms. The parameters are optimized classically to minimize the
//! expected energy.

use qnav_ir::{CircuitProgram, QubitId};

use super::check_register_width;
use crate::error::{AlgoError, AlgoResult};

/// Number of parameters the ansatz needs for `num_qubits`.
pub fn num_parameters(num_qubits: usize) -> usize {
    2 * num_qubits
}

/// Generate the hardware-efficient ansatz.
///
/// - Ry rotation with `params[q]` on each qubit
/// - CNOT ladder `q → q+1`
/// - Rz rotation with `params[q + n]` on each qubit
pub fn hardware_efficient_ansatz(num_qubits: usize, params: &[f64]) -> AlgoResult<CircuitProgram> {
    check_register_width(num_qubits)?;
    let expected = num_parameters(num_qubits);
    if params.len() != expected {
        return Err(AlgoError::InvalidConfiguration(format!(
            "ansatz over {num_qubits} qubits needs {expected} parameters, got {}",
            params.len()
        )));
    }

    let mut program = CircuitProgram::new("ansatz", num_qubits);
    for q in 0..num_qubits {
        program.ry(params[q], QubitId::from(q))?;
    }
    for q in 0..num_qubits - 1 {
        program.cx(QubitId::from(q), QubitId::from(q + 1))?;
    }
    for q in 0..num_qubits {
        program.rz(params[q + num_qubits], QubitId::from(q))?;
    }
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qnav_ir::GateOp;

    #[test]
    fn test_ansatz_layout() {
        let params: Vec<f64> = (0..8).map(|i| i as f64 * 0.1).collect();
        let program = hardware_efficient_ansatz(4, &params).unwrap();
        assert_eq!(program.len(), 4 + 3 + 4);
        assert_eq!(
            program.ops()[7],
            GateOp::Rz {
                qubit: QubitId(0),
                theta: params[4]
            }
        );
    }

    #[test]
    fn test_parameter_count_checked() {
        assert!(matches!(
            hardware_efficient_ansatz(3, &[0.0; 5]),
            Err(AlgoError::InvalidConfiguration(_))
        ));
    }
}
