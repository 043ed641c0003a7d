//! Circuit programs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::fmt;

use crate::error::IrResult;
use crate::gate::GateOp;
use crate::qubit::QubitId;

/// An ordered sequence of gates over a register of declared width.
///
/// Every gate is validated against the width when it is appended, so a
/// program that exists is always executable. Gates are kept in insertion
/// order; nothing reorders or fuses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitProgram {
    /// Name of the program.
    name: String,
    /// Register width.
    num_qubits: usize,
    /// Gates in execution order.
    ops: Vec<GateOp>,
}

impl CircuitProgram {
    /// Create an empty program over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            ops: vec![],
        }
    }

    /// Append a gate after validating its qubits.
    pub fn push(&mut self, op: GateOp) -> IrResult<&mut Self> {
        op.validate(self.num_qubits)?;
        self.ops.push(op);
        Ok(self)
    }

    /// Append every gate of `other`, in order.
    pub fn append(&mut self, other: &CircuitProgram) -> IrResult<&mut Self> {
        for op in &other.ops {
            op.validate(self.num_qubits)?;
        }
        self.ops.extend(other.ops.iter().cloned());
        Ok(self)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::Hadamard { qubit })
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::PauliX { qubit })
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::PauliZ { qubit })
    }

    /// Apply phase shift gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::PhaseShift { qubit, theta })
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::Ry { qubit, theta })
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::Rz { qubit, theta })
    }

    /// Apply Hadamard to every qubit.
    pub fn h_all(&mut self) -> IrResult<&mut Self> {
        for q in self.all_qubits() {
            self.h(q)?;
        }
        Ok(self)
    }

    /// Apply Pauli-X to every qubit.
    pub fn x_all(&mut self) -> IrResult<&mut Self> {
        for q in self.all_qubits() {
            self.x(q)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::ControlledX { control, target })
    }

    /// Apply controlled phase gate.
    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(GateOp::ControlledPhase {
            control,
            target,
            theta,
        })
    }

    /// Apply a phase flip conditioned on all `qubits` being 1.
    pub fn mcz(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.push(GateOp::MultiControlledPhaseFlip {
            qubits: qubits.into_iter().collect(),
        })
    }

    // =========================================================================
    // Composite fragments
    // =========================================================================

    /// Quantum Fourier transform over `register`, without the final
    /// bit-reversal swaps.
    ///
    /// `register[0]` is treated as the most significant bit of the input.
    pub fn qft(&mut self, register: &[QubitId]) -> IrResult<&mut Self> {
        for i in 0..register.len() {
            self.h(register[i])?;
            for j in (i + 1)..register.len() {
                self.cp(controlled_rotation_angle(j - i), register[j], register[i])?;
            }
        }
        Ok(self)
    }

    /// Inverse of [`CircuitProgram::qft`]: the same Hadamard and
    /// controlled-phase ladder in reverse order with negated angles.
    pub fn inverse_qft(&mut self, register: &[QubitId]) -> IrResult<&mut Self> {
        for i in (0..register.len()).rev() {
            for j in ((i + 1)..register.len()).rev() {
                self.cp(-controlled_rotation_angle(j - i), register[j], register[i])?;
            }
            self.h(register[i])?;
        }
        Ok(self)
    }

    /// The adjoint program: gates reversed and individually inverted.
    pub fn inverse(&self) -> CircuitProgram {
        CircuitProgram {
            name: format!("{}_dg", self.name),
            num_qubits: self.num_qubits,
            ops: self.ops.iter().rev().map(GateOp::inverse).collect(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the register width.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Gates in execution order.
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the program has no gates.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Gate histogram keyed by gate name.
    pub fn gate_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for op in &self.ops {
            *counts.entry(op.name()).or_insert(0) += 1;
        }
        counts
    }

    /// All qubits of the register, in index order.
    pub fn all_qubits(&self) -> Vec<QubitId> {
        (0..self.num_qubits).map(QubitId::from).collect()
    }
}

fn controlled_rotation_angle(distance: usize) -> f64 {
    PI / (1u64 << distance) as f64
}

impl fmt::Display for CircuitProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {}", self.name)?;
        writeln!(f, "qubit[{}] q;", self.num_qubits)?;
        for op in &self.ops {
            writeln!(f, "{op}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;

    #[test]
    fn test_new_program() {
        let program = CircuitProgram::new("test", 3);
        assert_eq!(program.name(), "test");
        assert_eq!(program.num_qubits(), 3);
        assert!(program.is_empty());
    }

    #[test]
    fn test_fluent_api() {
        let mut program = CircuitProgram::new("bell", 2);
        program
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        assert_eq!(program.len(), 2);
        assert_eq!(program.ops()[0], GateOp::Hadamard { qubit: QubitId(0) });
    }

    #[test]
    fn test_out_of_range_rejected_and_not_appended() {
        let mut program = CircuitProgram::new("test", 2);
        let err = program.x(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::InvalidQubitIndex { .. }));
        assert!(program.is_empty());
    }

    #[test]
    fn test_all_qubit_layers() {
        let mut program = CircuitProgram::new("layers", 4);
        program.h_all().unwrap().x_all().unwrap();
        let counts = program.gate_counts();
        assert_eq!(counts["h"], 4);
        assert_eq!(counts["x"], 4);
    }

    #[test]
    fn test_qft_gate_structure() {
        let register: Vec<QubitId> = (0..3u32).map(QubitId).collect();
        let mut program = CircuitProgram::new("qft", 3);
        program.qft(&register).unwrap();

        // 3 Hadamards + 3 pairwise controlled phases
        let counts = program.gate_counts();
        assert_eq!(counts["h"], 3);
        assert_eq!(counts["cp"], 3);
        assert_eq!(program.ops()[1].angle(), Some(PI / 2.0));
        assert_eq!(program.ops()[2].angle(), Some(PI / 4.0));
    }

    #[test]
    fn test_inverse_qft_is_adjoint_of_qft() {
        let register: Vec<QubitId> = (0..4u32).map(QubitId).collect();
        let mut forward = CircuitProgram::new("qft", 4);
        forward.qft(&register).unwrap();
        let mut backward = CircuitProgram::new("iqft", 4);
        backward.inverse_qft(&register).unwrap();

        assert_eq!(forward.inverse().ops(), backward.ops());
    }

    #[test]
    fn test_append_checks_width() {
        let mut wide = CircuitProgram::new("wide", 3);
        wide.x(QubitId(2)).unwrap();
        let mut narrow = CircuitProgram::new("narrow", 2);
        assert!(narrow.append(&wide).is_err());
        assert!(narrow.is_empty());
    }

    #[test]
    fn test_display_listing() {
        let mut program = CircuitProgram::new("demo", 2);
        program.h(QubitId(0)).unwrap().mcz([QubitId(0), QubitId(1)]).unwrap();
        let text = program.to_string();
        assert!(text.contains("qubit[2] q;"));
        assert!(text.contains("h q[0];"));
        assert!(text.contains("mcz q[0], q[1];"));
    }
}
