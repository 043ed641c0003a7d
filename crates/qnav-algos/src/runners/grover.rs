//! Grover search runner.

use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

use qnav_ir::CircuitProgram;
use qnav_sim::{Sampler, ShotHistogram, run};

use crate::circuits::{IterationFormula, check_register_width, grover_circuit};
use crate::error::{AlgoError, AlgoResult};

/// Result of a Grover search.
#[derive(Debug, Clone)]
pub struct GroverResult {
    /// Most frequently measured state.
    pub found_state: u64,
    /// Empirical probability of `found_state`.
    pub probability: f64,
    /// Oracle+diffusion rounds applied.
    pub iterations: usize,
    /// Measurement histogram over all qubits.
    pub histogram: ShotHistogram,
    /// Exact combined probability of the marked states before measurement.
    pub target_probability: f64,
}

/// Grover search over `2^n` basis states.
#[derive(Debug, Clone)]
pub struct GroverSearch {
    num_qubits: usize,
    targets: Vec<u64>,
    formula: IterationFormula,
    shots: u32,
    seed: Option<u64>,
}

impl GroverSearch {
    /// Create a search for `targets` in an `num_qubits`-wide register.
    ///
    /// Targets form a set; repeated entries are collapsed.
    pub fn new(num_qubits: usize, targets: &[u64]) -> AlgoResult<Self> {
        check_register_width(num_qubits)?;
        if targets.is_empty() {
            return Err(AlgoError::InvalidConfiguration(
                "Grover search needs at least one target state".into(),
            ));
        }
        let space = 1u64 << num_qubits;
        if let Some(t) = targets.iter().find(|&&t| t >= space) {
            return Err(AlgoError::InvalidConfiguration(format!(
                "target state {t} is outside the {num_qubits}-qubit space of {space} states"
            )));
        }

        let unique: BTreeSet<u64> = targets.iter().copied().collect();
        if unique.len() != targets.len() {
            warn!(
                "Collapsed {} duplicate target states",
                targets.len() - unique.len()
            );
        }

        Ok(Self {
            num_qubits,
            targets: unique.into_iter().collect(),
            formula: IterationFormula::default(),
            shots: 1024,
            seed: None,
        })
    }

    /// Set the iteration formula.
    pub fn with_formula(mut self, formula: IterationFormula) -> Self {
        self.formula = formula;
        self
    }

    /// Set the number of shots.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Seed the sampler.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Deduplicated targets in ascending order.
    pub fn targets(&self) -> &[u64] {
        &self.targets
    }

    /// Iterations the configured formula yields.
    pub fn iterations(&self) -> usize {
        self.formula.iterations(self.num_qubits, self.targets.len())
    }

    /// Build the search circuit.
    pub fn circuit(&self) -> AlgoResult<CircuitProgram> {
        grover_circuit(self.num_qubits, &self.targets, self.iterations())
    }

    /// Run the search and sample every qubit.
    #[instrument(skip(self), fields(qubits = self.num_qubits, targets = ?self.targets))]
    pub fn run(&self) -> AlgoResult<GroverResult> {
        let iterations = self.iterations();
        let program = grover_circuit(self.num_qubits, &self.targets, iterations)?;
        debug!(
            "Grover circuit: {} gates, {} iterations",
            program.len(),
            iterations
        );

        let state = run(&program)?;
        let probs = state.probabilities();
        let target_probability: f64 = self.targets.iter().map(|&t| probs[t as usize]).sum();

        let histogram = Sampler::from_seed_option(self.seed).sample(&state, self.shots)?;
        let (found_state, count) = histogram.most_frequent().ok_or_else(|| {
            AlgoError::InvalidConfiguration("no measurement outcomes recorded".into())
        })?;
        let probability = count as f64 / histogram.total() as f64;

        info!(
            "Grover found state {} with probability {:.3} after {} iterations",
            found_state, probability, iterations
        );

        Ok(GroverResult {
            found_state,
            probability,
            iterations,
            histogram,
            target_probability,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_out_of_range() {
        assert!(matches!(
            GroverSearch::new(3, &[]),
            Err(AlgoError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            GroverSearch::new(3, &[8]),
            Err(AlgoError::InvalidConfiguration(_))
        ));
        assert!(GroverSearch::new(0, &[0]).is_err());
    }

    #[test]
    fn test_duplicates_collapsed() {
        let search = GroverSearch::new(3, &[3, 1, 3]).unwrap();
        assert_eq!(search.targets(), &[1, 3]);
        assert_eq!(search.iterations(), 1);
    }

    #[test]
    fn test_single_target_found() {
        let result = GroverSearch::new(4, &[0b1010])
            .unwrap()
            .with_seed(Some(11))
            .run()
            .unwrap();
        assert_eq!(result.iterations, 3);
        assert_eq!(result.found_state, 0b1010);
        assert!(result.target_probability > 0.9);
        assert_eq!(result.histogram.total(), 1024);
    }

    #[test]
    fn test_zero_iterations_degrades_to_uniform() {
        let result = GroverSearch::new(2, &[0, 1, 2, 3])
            .unwrap()
            .with_seed(Some(5))
            .run()
            .unwrap();
        assert_eq!(result.iterations, 0);
        assert!((result.target_probability - 1.0).abs() < 1e-9);
        for outcome in 0..4 {
            assert!(result.histogram.count(outcome) > 150);
        }
    }
}
