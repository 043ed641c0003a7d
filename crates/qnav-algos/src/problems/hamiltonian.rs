//! Diagonal Hamiltonians.
//!
//! The fuel-cost model is a weighted sum of single-qubit Z observables:
//! H = Σ_q w_q Z_q
//! which is diagonal in the computational basis, so every basis state has a
//! definite energy.

use serde::{Deserialize, Serialize};

use qnav_ir::QubitId;
use qnav_sim::StateVector;

use crate::error::{AlgoError, AlgoResult};

/// A weighted sum of Pauli-Z terms, one per qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagonalHamiltonian {
    weights: Vec<f64>,
}

impl DiagonalHamiltonian {
    /// Create a Hamiltonian with one weight per qubit.
    pub fn new(weights: Vec<f64>) -> AlgoResult<Self> {
        if weights.is_empty() {
            return Err(AlgoError::InvalidConfiguration(
                "Hamiltonian needs at least one weight".into(),
            ));
        }
        if let Some(w) = weights.iter().find(|w| !w.is_finite()) {
            return Err(AlgoError::InvalidConfiguration(format!(
                "Hamiltonian weights must be finite, got {w}"
            )));
        }
        Ok(Self { weights })
    }

    /// All weights equal to 1.
    pub fn uniform(num_qubits: usize) -> AlgoResult<Self> {
        Self::new(vec![1.0; num_qubits])
    }

    /// Number of qubits the Hamiltonian acts on.
    pub fn num_qubits(&self) -> usize {
        self.weights.len()
    }

    /// Per-qubit weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// `Σ_q w_q ⟨Z_q⟩`, evaluated exactly from the amplitudes.
    pub fn expectation(&self, state: &StateVector) -> AlgoResult<f64> {
        if state.num_qubits() != self.num_qubits() {
            return Err(AlgoError::InvalidConfiguration(format!(
                "Hamiltonian over {} qubits applied to a {}-qubit state",
                self.num_qubits(),
                state.num_qubits()
            )));
        }
        let mut energy = 0.0;
        for (q, w) in self.weights.iter().enumerate() {
            energy += w * state.expectation_z(QubitId::from(q))?;
        }
        Ok(energy)
    }

    /// Energy of a single basis state.
    pub fn basis_energy(&self, index: u64) -> f64 {
        let n = self.num_qubits();
        self.weights
            .iter()
            .enumerate()
            .map(|(q, w)| if (index >> (n - 1 - q)) & 1 == 0 { *w } else { -w })
            .sum()
    }

    /// Lowest eigenvalue: `-Σ|w_q|`.
    pub fn ground_state_energy(&self) -> f64 {
        -self.weights.iter().map(|w| w.abs()).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qnav_ir::GateOp;

    #[test]
    fn test_uniform_ground_energy() {
        let h = DiagonalHamiltonian::uniform(4).unwrap();
        assert_eq!(h.num_qubits(), 4);
        assert_eq!(h.ground_state_energy(), -4.0);
        assert_eq!(h.basis_energy(0b1111), -4.0);
        assert_eq!(h.basis_energy(0), 4.0);
    }

    #[test]
    fn test_weighted_basis_energy() {
        let h = DiagonalHamiltonian::new(vec![1.0, 0.5, 0.3]).unwrap();
        // qubit 0 set: -1.0 + 0.5 + 0.3
        assert!((h.basis_energy(0b100) + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_expectation_matches_basis_energy() {
        let h = DiagonalHamiltonian::new(vec![1.0, 0.5, 0.3]).unwrap();
        let mut state = StateVector::new(3).unwrap();
        state.apply(&GateOp::PauliX { qubit: QubitId(1) }).unwrap();
        let e = h.expectation(&state).unwrap();
        assert!((e - h.basis_energy(0b010)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_weights() {
        assert!(DiagonalHamiltonian::new(vec![]).is_err());
        assert!(DiagonalHamiltonian::new(vec![1.0, f64::INFINITY]).is_err());
        let h = DiagonalHamiltonian::uniform(2).unwrap();
        assert!(h.expectation(&StateVector::new(3).unwrap()).is_err());
    }
}
