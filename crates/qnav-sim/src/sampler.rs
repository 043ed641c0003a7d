//! Measurement sampling.
//!
//! A [`Sampler`] owns its random number generator, so two samplers built
//! with the same seed draw identical histograms from identical states.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qnav_ir::{QubitId, basis_label};

use crate::NORMALIZATION_TOLERANCE;
use crate::error::{SimError, SimResult};
use crate::statevector::StateVector;

/// Outcome counts keyed by basis index over the measured qubits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShotHistogram {
    counts: BTreeMap<u64, u64>,
    width: usize,
    shots: u64,
}

impl ShotHistogram {
    /// Create an empty histogram over `width` measured bits.
    pub fn new(width: usize) -> Self {
        Self {
            counts: BTreeMap::new(),
            width,
            shots: 0,
        }
    }

    /// Record one occurrence of `outcome`.
    pub fn record(&mut self, outcome: u64) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.shots += 1;
    }

    /// Count for `outcome` (zero if never observed).
    pub fn count(&self, outcome: u64) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Empirical frequency of `outcome`.
    pub fn frequency(&self, outcome: u64) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.count(outcome) as f64 / self.shots as f64
    }

    /// Outcome with the highest count, ties going to the lowest index.
    pub fn most_frequent(&self) -> Option<(u64, u64)> {
        self.counts
            .iter()
            .fold(None, |best: Option<(u64, u64)>, (&outcome, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((outcome, count)),
            })
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> u64 {
        self.shots
    }

    /// Number of measured bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Observed outcomes and their counts in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    /// Counts keyed by fixed-width binary label.
    pub fn to_labelled_counts(&self) -> BTreeMap<String, u64> {
        self.iter()
            .map(|(outcome, count)| (basis_label(outcome, self.width), count))
            .collect()
    }

    /// Frequencies keyed by fixed-width binary label.
    pub fn to_labelled_frequencies(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(outcome, _)| (basis_label(outcome, self.width), self.frequency(outcome)))
            .collect()
    }
}

/// Exact outcome probabilities of every basis state, without sampling.
pub fn probabilities(state: &StateVector) -> BTreeMap<u64, f64> {
    state
        .probabilities()
        .into_iter()
        .enumerate()
        .map(|(i, p)| (i as u64, p))
        .collect()
}

/// Draws measurement outcomes from a state vector.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Deterministic sampler: equal seeds give equal draws.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sampler seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Sampler from an optional seed.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Measure every qubit `shots` times.
    ///
    /// The state is not modified. Fails if the outcome probabilities do not
    /// sum to one within tolerance; the state is never renormalized here.
    pub fn sample(&mut self, state: &StateVector, shots: u32) -> SimResult<ShotHistogram> {
        let probs = state.probabilities();
        self.draw(&probs, state.num_qubits(), shots)
    }

    /// Measure only `qubits`, `shots` times.
    ///
    /// Outcome bits follow the order of `qubits`, the first being the most
    /// significant.
    pub fn sample_qubits(
        &mut self,
        state: &StateVector,
        qubits: &[QubitId],
        shots: u32,
    ) -> SimResult<ShotHistogram> {
        if qubits.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "no qubits selected for measurement".into(),
            ));
        }
        for (i, q) in qubits.iter().enumerate() {
            state.check_qubit(*q)?;
            if qubits[..i].contains(q) {
                return Err(SimError::InvalidConfiguration(format!(
                    "qubit {q} selected twice for measurement"
                )));
            }
        }

        let n = state.num_qubits();
        let masks: Vec<usize> = qubits.iter().map(|q| q.mask(n)).collect();
        let mut marginal = vec![0.0; 1 << qubits.len()];
        for (i, amp) in state.amplitudes().iter().enumerate() {
            let outcome = masks
                .iter()
                .fold(0usize, |acc, m| (acc << 1) | usize::from(i & m != 0));
            marginal[outcome] += amp.norm_sqr();
        }
        self.draw(&marginal, qubits.len(), shots)
    }

    /// Projective measurement of one qubit.
    ///
    /// Collapses `state` onto the observed value and renormalizes it.
    pub fn measure_qubit(&mut self, state: &mut StateVector, qubit: QubitId) -> SimResult<u8> {
        state.check_qubit(qubit)?;
        state.check_normalized(NORMALIZATION_TOLERANCE)?;
        let mask = qubit.mask(state.num_qubits());
        let p_one: f64 = state
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();
        let outcome = u8::from(self.rng.r#gen::<f64>() < p_one);
        state.collapse(qubit, outcome);
        Ok(outcome)
    }

    fn draw(&mut self, probs: &[f64], width: usize, shots: u32) -> SimResult<ShotHistogram> {
        if shots == 0 {
            return Err(SimError::InvalidConfiguration(
                "shot count must be at least 1".into(),
            ));
        }

        let mut cumulative = Vec::with_capacity(probs.len());
        let mut total = 0.0;
        for p in probs {
            total += p;
            cumulative.push(total);
        }
        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(SimError::NumericInvariantViolation { total });
        }
        // Rounding can leave a sliver past the last nonzero outcome.
        let last_support = probs.iter().rposition(|&p| p > 0.0).unwrap_or(0);

        let mut histogram = ShotHistogram::new(width);
        for _ in 0..shots {
            let r = self.rng.r#gen::<f64>() * total;
            let outcome = cumulative.partition_point(|&c| c <= r).min(last_support);
            histogram.record(outcome as u64);
        }
        Ok(histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qnav_ir::GateOp;

    fn plus_state(n: u32) -> StateVector {
        let mut sv = StateVector::new(n as usize).unwrap();
        for q in 0..n {
            sv.apply(&GateOp::Hadamard { qubit: QubitId(q) }).unwrap();
        }
        sv
    }

    #[test]
    fn test_sample_deterministic_basis_state() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply(&GateOp::PauliX { qubit: QubitId(1) }).unwrap();

        let hist = Sampler::seeded(1).sample(&sv, 100).unwrap();
        assert_eq!(hist.count(0b01), 100);
        assert_eq!(hist.total(), 100);
        assert_eq!(hist.to_labelled_counts()["01"], 100);
    }

    #[test]
    fn test_same_seed_same_histogram() {
        let sv = plus_state(3);
        let a = Sampler::seeded(42).sample(&sv, 500).unwrap();
        let b = Sampler::seeded(42).sample(&sv, 500).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_shots_rejected() {
        let sv = plus_state(1);
        assert!(matches!(
            Sampler::seeded(0).sample(&sv, 0),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unnormalized_state_rejected() {
        let one = Complex64::new(1.0, 0.0);
        let sv = StateVector::from_amplitudes(vec![one, one]).unwrap();
        assert!(matches!(
            Sampler::seeded(0).sample(&sv, 10),
            Err(SimError::NumericInvariantViolation { .. })
        ));
    }

    #[test]
    fn test_sample_qubits_marginal() {
        // q0 = 1, q1 in superposition, q2 = 0
        let mut sv = StateVector::new(3).unwrap();
        sv.apply(&GateOp::PauliX { qubit: QubitId(0) }).unwrap();
        sv.apply(&GateOp::Hadamard { qubit: QubitId(1) }).unwrap();

        let hist = Sampler::seeded(7)
            .sample_qubits(&sv, &[QubitId(2), QubitId(0)], 200)
            .unwrap();
        assert_eq!(hist.width(), 2);
        assert_eq!(hist.count(0b01), 200);
    }

    #[test]
    fn test_sample_qubits_rejects_bad_selection() {
        let sv = plus_state(2);
        let mut sampler = Sampler::seeded(0);
        assert!(sampler.sample_qubits(&sv, &[], 10).is_err());
        assert!(sampler.sample_qubits(&sv, &[QubitId(2)], 10).is_err());
        assert!(
            sampler
                .sample_qubits(&sv, &[QubitId(1), QubitId(1)], 10)
                .is_err()
        );
    }

    #[test]
    fn test_measure_qubit_collapses() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply(&GateOp::Hadamard { qubit: QubitId(0) }).unwrap();
        sv.apply(&GateOp::ControlledX {
            control: QubitId(0),
            target: QubitId(1),
        })
        .unwrap();

        let mut sampler = Sampler::seeded(3);
        let first = sampler.measure_qubit(&mut sv, QubitId(0)).unwrap();
        let second = sampler.measure_qubit(&mut sv, QubitId(1)).unwrap();
        assert_eq!(first, second);
        assert!(sv.check_normalized(1e-12).is_ok());
    }

    #[test]
    fn test_most_frequent_tie_goes_to_lowest() {
        let mut hist = ShotHistogram::new(2);
        hist.record(3);
        hist.record(1);
        hist.record(3);
        hist.record(1);
        assert_eq!(hist.most_frequent(), Some((1, 2)));
        assert_eq!(ShotHistogram::new(1).most_frequent(), None);
    }

    #[test]
    fn test_exact_probabilities() {
        let probs = probabilities(&plus_state(2));
        assert_eq!(probs.len(), 4);
        for p in probs.values() {
            assert!((p - 0.25).abs() < 1e-12);
        }
    }
}
