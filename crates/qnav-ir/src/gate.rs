//! Gate operations.
//!
//! A [`GateOp`] is a pure description of a unitary: it names the gate, the
//! qubits it acts on and its angle, and knows nothing about any state vector.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// The gate set understood by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "snake_case")]
pub enum GateOp {
    /// Hadamard gate.
    Hadamard {
        /// Target qubit.
        qubit: QubitId,
    },
    /// Phase shift: multiplies `|1⟩` of `qubit` by `e^{iθ}`.
    PhaseShift {
        /// Target qubit.
        qubit: QubitId,
        /// Phase angle θ in radians.
        theta: f64,
    },
    /// Pauli-X (NOT) gate.
    PauliX {
        /// Target qubit.
        qubit: QubitId,
    },
    /// Pauli-Z gate.
    PauliZ {
        /// Target qubit.
        qubit: QubitId,
    },
    /// Controlled-NOT.
    ControlledX {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Rotation about the Y axis.
    Ry {
        /// Target qubit.
        qubit: QubitId,
        /// Rotation angle θ in radians.
        theta: f64,
    },
    /// Rotation about the Z axis.
    Rz {
        /// Target qubit.
        qubit: QubitId,
        /// Rotation angle θ in radians.
        theta: f64,
    },
    /// Controlled phase: multiplies `|11⟩` of (control, target) by `e^{iθ}`.
    ControlledPhase {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
        /// Phase angle θ in radians.
        theta: f64,
    },
    /// Negates every amplitude whose listed qubits are all 1.
    ///
    /// With one qubit this is Z, with two it is CZ, with three CCZ.
    MultiControlledPhaseFlip {
        /// Qubits that must all be 1 for the flip.
        qubits: Vec<QubitId>,
    },
}

impl GateOp {
    /// Short lowercase gate name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateOp::Hadamard { .. } => "h",
            GateOp::PhaseShift { .. } => "p",
            GateOp::PauliX { .. } => "x",
            GateOp::PauliZ { .. } => "z",
            GateOp::ControlledX { .. } => "cx",
            GateOp::Ry { .. } => "ry",
            GateOp::Rz { .. } => "rz",
            GateOp::ControlledPhase { .. } => "cp",
            GateOp::MultiControlledPhaseFlip { .. } => "mcz",
        }
    }

    /// Qubits touched by this gate, controls first.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            GateOp::Hadamard { qubit }
            | GateOp::PhaseShift { qubit, .. }
            | GateOp::PauliX { qubit }
            | GateOp::PauliZ { qubit }
            | GateOp::Ry { qubit, .. }
            | GateOp::Rz { qubit, .. } => vec![*qubit],
            GateOp::ControlledX { control, target }
            | GateOp::ControlledPhase {
                control, target, ..
            } => vec![*control, *target],
            GateOp::MultiControlledPhaseFlip { qubits } => qubits.clone(),
        }
    }

    /// Number of qubits this gate acts on.
    pub fn num_qubits(&self) -> usize {
        match self {
            GateOp::MultiControlledPhaseFlip { qubits } => qubits.len(),
            GateOp::ControlledX { .. } | GateOp::ControlledPhase { .. } => 2,
            _ => 1,
        }
    }

    /// The gate's angle, if it has one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            GateOp::PhaseShift { theta, .. }
            | GateOp::Ry { theta, .. }
            | GateOp::Rz { theta, .. }
            | GateOp::ControlledPhase { theta, .. } => Some(*theta),
            _ => None,
        }
    }

    /// Whether the gate is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            GateOp::PhaseShift { .. }
                | GateOp::PauliZ { .. }
                | GateOp::Rz { .. }
                | GateOp::ControlledPhase { .. }
                | GateOp::MultiControlledPhaseFlip { .. }
        )
    }

    /// The adjoint of this gate.
    ///
    /// H, X, Z, CX and the phase flip are self-inverse; angled gates negate
    /// their angle.
    pub fn inverse(&self) -> GateOp {
        match self {
            GateOp::PhaseShift { qubit, theta } => GateOp::PhaseShift {
                qubit: *qubit,
                theta: -theta,
            },
            GateOp::Ry { qubit, theta } => GateOp::Ry {
                qubit: *qubit,
                theta: -theta,
            },
            GateOp::Rz { qubit, theta } => GateOp::Rz {
                qubit: *qubit,
                theta: -theta,
            },
            GateOp::ControlledPhase {
                control,
                target,
                theta,
            } => GateOp::ControlledPhase {
                control: *control,
                target: *target,
                theta: -theta,
            },
            other => other.clone(),
        }
    }

    /// Check that every qubit is inside an `num_qubits`-wide register and
    /// that no qubit is repeated.
    pub fn validate(&self, num_qubits: usize) -> IrResult<()> {
        let qubits = self.qubits();
        if qubits.is_empty() {
            return Err(IrError::EmptyQubitSet(self.name().to_string()));
        }
        for (i, q) in qubits.iter().enumerate() {
            if q.index() >= num_qubits {
                return Err(IrError::InvalidQubitIndex {
                    qubit: *q,
                    num_qubits,
                    gate_name: Some(self.name().to_string()),
                });
            }
            if qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(self.name().to_string()),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for GateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if let Some(theta) = self.angle() {
            write!(f, "({theta:.6})")?;
        }
        let operands: Vec<String> = self
            .qubits()
            .iter()
            .map(|q| format!("q[{}]", q.0))
            .collect();
        write!(f, " {};", operands.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_names_and_arity() {
        let cp = GateOp::ControlledPhase {
            control: QubitId(0),
            target: QubitId(2),
            theta: PI,
        };
        assert_eq!(cp.name(), "cp");
        assert_eq!(cp.num_qubits(), 2);
        assert_eq!(cp.qubits(), vec![QubitId(0), QubitId(2)]);
        assert_eq!(cp.angle(), Some(PI));

        let mcz = GateOp::MultiControlledPhaseFlip {
            qubits: vec![QubitId(0), QubitId(1), QubitId(2)],
        };
        assert_eq!(mcz.num_qubits(), 3);
        assert!(mcz.is_diagonal());
        assert_eq!(mcz.angle(), None);
    }

    #[test]
    fn test_inverse_negates_angles() {
        let ry = GateOp::Ry {
            qubit: QubitId(1),
            theta: 0.3,
        };
        assert_eq!(
            ry.inverse(),
            GateOp::Ry {
                qubit: QubitId(1),
                theta: -0.3
            }
        );
        let h = GateOp::Hadamard { qubit: QubitId(0) };
        assert_eq!(h.inverse(), h);
    }

    #[test]
    fn test_validate_out_of_range() {
        let x = GateOp::PauliX { qubit: QubitId(3) };
        let err = x.validate(3).unwrap_err();
        assert!(matches!(
            err,
            IrError::InvalidQubitIndex {
                qubit: QubitId(3),
                num_qubits: 3,
                ..
            }
        ));
        assert!(x.validate(4).is_ok());
    }

    #[test]
    fn test_validate_duplicate_and_empty() {
        let cx = GateOp::ControlledX {
            control: QubitId(1),
            target: QubitId(1),
        };
        assert!(matches!(
            cx.validate(2),
            Err(IrError::DuplicateQubit { .. })
        ));

        let mcz = GateOp::MultiControlledPhaseFlip { qubits: vec![] };
        assert!(matches!(mcz.validate(2), Err(IrError::EmptyQubitSet(_))));
    }

    #[test]
    fn test_display() {
        let cx = GateOp::ControlledX {
            control: QubitId(0),
            target: QubitId(1),
        };
        assert_eq!(cx.to_string(), "cx q[0], q[1];");

        let p = GateOp::PhaseShift {
            qubit: QubitId(2),
            theta: 0.5,
        };
        assert_eq!(p.to_string(), "p(0.500000) q[2];");
    }

    #[test]
    fn test_serde_tagged() {
        let h = GateOp::Hadamard { qubit: QubitId(0) };
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"gate":"hadamard","qubit":0}"#);
        let back: GateOp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
