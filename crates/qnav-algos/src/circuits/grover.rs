//! Grover's search algorithm circuit generator.
//!
//! Grover's algorithm finds marked items in an unstructured space of
//! `N = 2^n` states with O(sqrt(N)) oracle queries. Every multi-controlled
//! operation is a single [`GateOp::MultiControlledPhaseFlip`] across the
//! whole register, so the same construction works for any width.
//!
//! [`GateOp::MultiControlledPhaseFlip`]: qnav_ir::GateOp::MultiControlledPhaseFlip

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use qnav_ir::{CircuitProgram, QubitId};

use crate::error::AlgoResult;

/// How the number of Grover iterations is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationFormula {
    /// `floor(π/4 · √(N / M))` for `M` marked states.
    #[default]
    Amplified,
    /// `floor(π/4 · √N)`, ignoring the number of marked states.
    SingleTarget,
}

impl IterationFormula {
    /// Number of oracle+diffusion rounds for `num_targets` marked states.
    pub fn iterations(self, num_qubits: usize, num_targets: usize) -> usize {
        let space = 2f64.powi(num_qubits as i32);
        let ratio = match self {
            IterationFormula::Amplified => space / num_targets.max(1) as f64,
            IterationFormula::SingleTarget => space,
        };
        (PI / 4.0 * ratio.sqrt()).floor() as usize
    }
}

/// Generate a Grover search circuit.
///
/// # Arguments
/// * `num_qubits` - Number of qubits (search space size = 2^n)
/// * `targets` - Marked states, each below 2^n
/// * `iterations` - Number of Grover iterations
///
/// The caller validates `targets`; a target outside the register would mark
/// the wrong state.
pub fn grover_circuit(
    num_qubits: usize,
    targets: &[u64],
    iterations: usize,
) -> AlgoResult<CircuitProgram> {
    let mut program = CircuitProgram::new("grover", num_qubits);

    // Uniform superposition
    program.h_all()?;

    for _ in 0..iterations {
        for &target in targets {
            apply_oracle(&mut program, target)?;
        }
        apply_diffusion(&mut program)?;
    }

    Ok(program)
}

/// Negate the amplitude of `target` only.
///
/// X on every qubit whose target bit is 0 maps `target` onto |1...1⟩, where
/// the phase flip acts, and the second X layer maps it back.
fn apply_oracle(program: &mut CircuitProgram, target: u64) -> AlgoResult<()> {
    let n = program.num_qubits();
    let zero_bits: Vec<QubitId> = (0..n)
        .filter(|&q| (target >> (n - 1 - q)) & 1 == 0)
        .map(QubitId::from)
        .collect();

    for &q in &zero_bits {
        program.x(q)?;
    }
    program.mcz(program.all_qubits())?;
    for &q in &zero_bits {
        program.x(q)?;
    }
    Ok(())
}

/// Apply the diffusion operator (inversion about the mean).
fn apply_diffusion(program: &mut CircuitProgram) -> AlgoResult<()> {
    program.h_all()?.x_all()?;
    program.mcz(program.all_qubits())?;
    program.x_all()?.h_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qnav_sim::run;

    #[test]
    fn test_iteration_formulas() {
        // N=8, two targets: π/4·√4 ≈ 1.57 → 1
        assert_eq!(IterationFormula::Amplified.iterations(3, 2), 1);
        // N=8 ignoring targets: π/4·√8 ≈ 2.22 → 2
        assert_eq!(IterationFormula::SingleTarget.iterations(3, 2), 2);
        // N=16, one target: π/4·4 ≈ 3.14 → 3
        assert_eq!(IterationFormula::Amplified.iterations(4, 1), 3);
        // Every state marked: π/4 → 0
        assert_eq!(IterationFormula::Amplified.iterations(2, 4), 0);
    }

    #[test]
    fn test_grover_circuit_structure() {
        let program = grover_circuit(3, &[1, 3], 1).unwrap();
        let counts = program.gate_counts();
        // one flip per target + one in the diffusion
        assert_eq!(counts["mcz"], 3);
        // initial layer + two diffusion layers
        assert_eq!(counts["h"], 9);
    }

    #[test]
    fn test_oracle_flips_only_zero_bits() {
        // target 0b011: only qubit 0 is 0
        let mut program = CircuitProgram::new("oracle", 3);
        apply_oracle(&mut program, 0b011).unwrap();
        assert_eq!(program.gate_counts()["x"], 2);
        assert_eq!(program.ops()[0].qubits(), vec![QubitId(0)]);
    }

    #[test]
    fn test_oracle_negates_only_target_amplitude() {
        for n in 1..=5_usize {
            let uniform = 1.0 / 2f64.powi(n as i32).sqrt();
            for target in 0..(1u64 << n) {
                let mut program = CircuitProgram::new("oracle", n);
                program.h_all().unwrap();
                apply_oracle(&mut program, target).unwrap();
                let state = run(&program).unwrap();
                for (i, amp) in state.amplitudes().iter().enumerate() {
                    let expected = if i as u64 == target { -uniform } else { uniform };
                    assert!(
                        (amp.re - expected).abs() < 1e-12 && amp.im.abs() < 1e-12,
                        "n={n} target={target} index={i}: {amp}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_diffusion_reflects_about_mean() {
        // I - 2|s⟩⟨s| maps a_i to -(2·mean - a_i)
        let mut prep = CircuitProgram::new("prep", 3);
        prep.ry(0.4, QubitId(0))
            .unwrap()
            .ry(1.3, QubitId(1))
            .unwrap()
            .cx(QubitId(1), QubitId(2))
            .unwrap()
            .rz(0.7, QubitId(2))
            .unwrap();
        let before = run(&prep).unwrap();

        let mut program = prep.clone();
        apply_diffusion(&mut program).unwrap();
        let after = run(&program).unwrap();

        let amps = before.amplitudes();
        let mean = amps.iter().sum::<Complex64>() / amps.len() as f64;
        for (a, b) in amps.iter().zip(after.amplitudes()) {
            let expected = -(mean * 2.0 - a);
            assert!((b - expected).norm() < 1e-12, "{b} != {expected}");
        }
    }

    #[test]
    fn test_zero_iterations_is_plain_superposition() {
        let program = grover_circuit(2, &[0], 0).unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn test_formula_serde_names() {
        let json = serde_json::to_string(&IterationFormula::SingleTarget).unwrap();
        assert_eq!(json, "\"single_target\"");
    }
}
