//! Superposition sampling runner.

use tracing::{debug, instrument};

use qnav_sim::{Sampler, ShotHistogram, run};

use crate::circuits::superposition_circuit;
use crate::error::AlgoResult;

/// Samples the interference circuit.
#[derive(Debug, Clone)]
pub struct SuperpositionRunner {
    num_qubits: usize,
    shots: u32,
    seed: Option<u64>,
}

impl SuperpositionRunner {
    /// Create a runner over `num_qubits`.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
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

    /// Build, execute and sample the circuit.
    #[instrument(skip(self), fields(qubits = self.num_qubits))]
    pub fn run(&self) -> AlgoResult<ShotHistogram> {
        let program = superposition_circuit(self.num_qubits)?;
        let state = run(&program)?;
        let histogram = Sampler::from_seed_option(self.seed).sample(&state, self.shots)?;
        debug!("Observed {} distinct outcomes", histogram.iter().count());
        Ok(histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shots_accounted() {
        let hist = SuperpositionRunner::new(3)
            .with_shots(500)
            .with_seed(Some(1))
            .run()
            .unwrap();
        assert_eq!(hist.total(), 500);
        assert_eq!(hist.width(), 3);
    }

    #[test]
    fn test_single_qubit_is_balanced() {
        let hist = SuperpositionRunner::new(1)
            .with_seed(Some(4))
            .run()
            .unwrap();
        assert!(hist.count(0) > 400 && hist.count(1) > 400);
    }
}
