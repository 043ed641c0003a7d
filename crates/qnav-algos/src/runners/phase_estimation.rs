//! Quantum phase estimation runner.

use std::f64::consts::TAU;
use tracing::{info, instrument};

use qnav_sim::{Sampler, ShotHistogram, run};

use crate::circuits::{counting_register, phase_estimation_circuit};
use crate::error::{AlgoError, AlgoResult};

/// Result of a phase estimation run.
#[derive(Debug, Clone)]
pub struct PhaseEstimationResult {
    /// Histogram over the counting register only.
    pub histogram: ShotHistogram,
    /// Distinguishable phase buckets, `2^m`.
    pub precision: u64,
    /// Most frequent counting outcome.
    pub most_likely: u64,
    /// `2π · most_likely / 2^m`.
    pub estimated_phase: f64,
}

/// Estimates the phase of a controlled-phase unitary.
#[derive(Debug, Clone)]
pub struct PhaseEstimator {
    counting_qubits: usize,
    phase: f64,
    shots: u32,
    seed: Option<u64>,
}

impl PhaseEstimator {
    /// Create an estimator with `counting_qubits` of precision.
    pub fn new(counting_qubits: usize, phase: f64) -> Self {
        Self {
            counting_qubits,
            phase,
            shots: 1024,
            seed: None,
        }
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

    /// Number of phase buckets.
    pub fn precision(&self) -> u64 {
        1u64 << self.counting_qubits.min(63)
    }

    /// Run the circuit and measure the counting register.
    #[instrument(skip(self), fields(counting_qubits = self.counting_qubits, phase = self.phase))]
    pub fn run(&self) -> AlgoResult<PhaseEstimationResult> {
        let program = phase_estimation_circuit(self.counting_qubits, self.phase)?;
        let state = run(&program)?;

        let register = counting_register(self.counting_qubits);
        let histogram =
            Sampler::from_seed_option(self.seed).sample_qubits(&state, &register, self.shots)?;
        let (most_likely, _) = histogram.most_frequent().ok_or_else(|| {
            AlgoError::InvalidConfiguration("no measurement outcomes recorded".into())
        })?;

        let precision = self.precision();
        let estimated_phase = TAU * most_likely as f64 / precision as f64;
        info!(
            "Phase estimate {:.6} (outcome {} of {})",
            estimated_phase, most_likely, precision
        );

        Ok(PhaseEstimationResult {
            histogram,
            precision,
            most_likely,
            estimated_phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_exact_eighth_turn() {
        let result = PhaseEstimator::new(3, PI / 4.0)
            .with_seed(Some(9))
            .run()
            .unwrap();
        assert_eq!(result.precision, 8);
        assert_eq!(result.most_likely, 0b001);
        assert_eq!(result.histogram.count(0b001), 1024);
        assert!((result.estimated_phase - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_three_sixteenths() {
        let phase = TAU * 3.0 / 16.0;
        let result = PhaseEstimator::new(4, phase)
            .with_seed(Some(2))
            .run()
            .unwrap();
        assert_eq!(result.most_likely, 3);
    }

    #[test]
    fn test_zero_counting_qubits_rejected() {
        assert!(PhaseEstimator::new(0, 1.0).run().is_err());
    }
}
