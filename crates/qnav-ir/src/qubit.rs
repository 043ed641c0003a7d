//! Qubit addressing and basis-state labelling.
//!
//! Qubit 0 is the most significant bit of a basis-state index. For an
//! `n`-qubit register the bit belonging to qubit `q` sits at position
//! `n - 1 - q`, so the binary label of an index reads qubit 0 first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit index as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Bit mask selecting this qubit in a basis-state index of an
    /// `num_qubits`-wide register.
    ///
    /// The caller must ensure `self < num_qubits`.
    #[inline]
    pub fn mask(self, num_qubits: usize) -> usize {
        1 << (num_qubits - 1 - self.index())
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).unwrap_or(u32::MAX))
    }
}

/// Fixed-width binary label of a basis-state index, qubit 0 first.
pub fn basis_label(index: u64, width: usize) -> String {
    format!("{index:0width$b}")
}

/// Value (0 or 1) of `qubit` in basis-state `index` of a `num_qubits` register.
#[inline]
pub fn bit_of(index: usize, qubit: QubitId, num_qubits: usize) -> u8 {
    u8::from(index & qubit.mask(num_qubits) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(3)), "q3");
    }

    #[test]
    fn test_qubit_zero_is_most_significant() {
        assert_eq!(QubitId(0).mask(3), 0b100);
        assert_eq!(QubitId(2).mask(3), 0b001);
        assert_eq!(bit_of(0b100, QubitId(0), 3), 1);
        assert_eq!(bit_of(0b100, QubitId(2), 3), 0);
    }

    #[test]
    fn test_basis_label() {
        assert_eq!(basis_label(1, 3), "001");
        assert_eq!(basis_label(6, 4), "0110");
        assert_eq!(basis_label(0, 1), "0");
    }

    #[test]
    fn test_oversized_usize_saturates() {
        let q = QubitId::from(usize::MAX);
        assert_eq!(q, QubitId(u32::MAX));
    }
}
