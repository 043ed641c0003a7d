//! Quantum phase estimation circuit.

use qnav_ir::{CircuitProgram, QubitId};

use super::check_register_width;
use crate::error::{AlgoError, AlgoResult};

/// The counting register: qubits `0..m`.
pub fn counting_register(counting_qubits: usize) -> Vec<QubitId> {
    (0..counting_qubits).map(QubitId::from).collect()
}

/// Generate a phase estimation circuit for a controlled phase of `phase`
/// radians.
///
/// Qubits `0..m` count, qubit `m` holds the |1⟩ eigenstate. Counting qubit
/// `q` controls a phase of `phase · 2^q` on the eigenstate qubit, then the
/// inverse QFT runs over the counting register.
pub fn phase_estimation_circuit(counting_qubits: usize, phase: f64) -> AlgoResult<CircuitProgram> {
    let width = counting_qubits.checked_add(1).ok_or_else(|| {
        AlgoError::InvalidConfiguration(format!(
            "{counting_qubits} counting qubits do not fit in a register"
        ))
    })?;
    check_register_width(width)?;
    if !phase.is_finite() {
        return Err(AlgoError::InvalidConfiguration(format!(
            "phase must be finite, got {phase}"
        )));
    }

    let eigenstate = QubitId::from(counting_qubits);
    let register = counting_register(counting_qubits);
    let mut program = CircuitProgram::new("phase_estimation", width);

    program.x(eigenstate)?;
    for &q in &register {
        program.h(q)?;
    }
    for (power, &q) in register.iter().enumerate() {
        let angle = phase * (1u64 << power) as f64;
        program.cp(angle, q, eigenstate)?;
    }
    program.inverse_qft(&register)?;
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_phase_ladder_angles() {
        let program = phase_estimation_circuit(3, PI / 4.0).unwrap();
        assert_eq!(program.num_qubits(), 4);
        // X, 3 H, then the controlled phases
        assert_eq!(program.ops()[4].angle(), Some(PI / 4.0));
        assert_eq!(program.ops()[5].angle(), Some(PI / 2.0));
        assert_eq!(program.ops()[6].angle(), Some(PI));
    }

    #[test]
    fn test_huge_counting_register_rejected() {
        assert!(matches!(
            phase_estimation_circuit(usize::MAX, 1.0),
            Err(AlgoError::InvalidConfiguration(_))
        ));
        assert!(phase_estimation_circuit(qnav_sim::MAX_QUBITS, 1.0).is_err());
    }

    #[test]
    fn test_non_finite_phase_rejected() {
        assert!(phase_estimation_circuit(3, f64::NAN).is_err());
    }
}
