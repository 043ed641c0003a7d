//! Property-based tests for circuit-program validation.

use proptest::prelude::*;
use qnav_ir::{CircuitProgram, GateOp, IrError, QubitId};

/// A gate over a register of `num_qubits`, all indices in range.
fn arb_valid_gate(num_qubits: u32) -> impl Strategy<Value = GateOp> {
    let q = 0..num_qubits;
    let angle = -6.3_f64..6.3;
    let single = prop_oneof![
        q.clone().prop_map(|q| GateOp::Hadamard { qubit: QubitId(q) }),
        q.clone().prop_map(|q| GateOp::PauliX { qubit: QubitId(q) }),
        q.clone().prop_map(|q| GateOp::PauliZ { qubit: QubitId(q) }),
        (q.clone(), angle.clone()).prop_map(|(q, theta)| GateOp::PhaseShift {
            qubit: QubitId(q),
            theta
        }),
        (q.clone(), angle.clone()).prop_map(|(q, theta)| GateOp::Ry {
            qubit: QubitId(q),
            theta
        }),
        (q.clone(), angle.clone()).prop_map(|(q, theta)| GateOp::Rz {
            qubit: QubitId(q),
            theta
        }),
    ];
    if num_qubits < 2 {
        return single.boxed();
    }
    let pair = (q.clone(), q).prop_filter("distinct qubits", |(a, b)| a != b);
    prop_oneof![
        single,
        pair.clone().prop_map(|(c, t)| GateOp::ControlledX {
            control: QubitId(c),
            target: QubitId(t)
        }),
        (pair, angle).prop_map(|((c, t), theta)| GateOp::ControlledPhase {
            control: QubitId(c),
            target: QubitId(t),
            theta
        }),
        Just(GateOp::MultiControlledPhaseFlip {
            qubits: (0..num_qubits).map(QubitId).collect()
        }),
    ]
    .boxed()
}

fn arb_program() -> impl Strategy<Value = (u32, Vec<GateOp>)> {
    (1_u32..=5).prop_flat_map(|n| (Just(n), prop::collection::vec(arb_valid_gate(n), 0..=20)))
}

proptest! {
    #[test]
    fn valid_gates_are_always_accepted((n, ops) in arb_program()) {
        let mut program = CircuitProgram::new("prop", n as usize);
        for op in ops.iter().cloned() {
            prop_assert!(program.push(op).is_ok());
        }
        prop_assert_eq!(program.ops(), ops.as_slice());
    }

    #[test]
    fn out_of_range_qubit_is_rejected(n in 1_u32..=8, offset in 0_u32..16) {
        let mut program = CircuitProgram::new("prop", n as usize);
        let bad = QubitId(n + offset);
        let is_out_of_range = matches!(
            program.h(bad),
            Err(IrError::InvalidQubitIndex { .. })
        );
        prop_assert!(is_out_of_range);
        prop_assert!(program.is_empty());
    }

    #[test]
    fn double_inverse_restores_gates((n, ops) in arb_program()) {
        let mut program = CircuitProgram::new("prop", n as usize);
        for op in ops {
            program.push(op).unwrap();
        }
        let twice = program.inverse().inverse();
        prop_assert_eq!(twice.ops(), program.ops());
    }
}
