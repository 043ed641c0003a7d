//! Simulated quantum annealing over bit strings.
//!
//! The walk proposes bit flips, several at once early on ("tunnelling") and
//! single flips later, and accepts uphill moves with a probability that
//! shrinks as the temperature falls. The best state ever accepted is kept.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::circuits::check_register_width;
use crate::error::{AlgoError, AlgoResult};

/// Temperature at `step` of `steps`: falls linearly from 1 towards 0.
pub fn temperature(step: usize, steps: usize) -> f64 {
    1.0 - step as f64 / steps as f64
}

/// Probability of a multi-bit tunnelling proposal at `step`.
pub fn tunnelling_probability(step: usize, steps: usize) -> f64 {
    (-(step as f64) / (steps as f64 * 0.3)).exp()
}

/// Probability of accepting a move that changes the cost by `delta`.
///
/// Downhill moves are always taken. Uphill moves combine a Boltzmann factor
/// with a fluctuation term of half the temperature.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        return 1.0;
    }
    (-delta / (temperature + 0.01)).exp() + temperature * 0.5
}

/// Result of an annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingResult {
    /// Lowest-cost state accepted.
    pub best_state: u64,
    /// Its cost.
    pub best_cost: f64,
    /// Random starting state.
    pub initial_state: u64,
    /// Cost of the starting state.
    pub initial_cost: f64,
    /// Cost of the current state after every step.
    pub cost_trace: Vec<f64>,
    /// Number of accepted proposals.
    pub accepted: usize,
}

/// Anneals an `n`-bit state against a caller-supplied cost.
#[derive(Debug, Clone)]
pub struct QuantumAnnealer {
    num_bits: usize,
    steps: usize,
    seed: Option<u64>,
}

impl QuantumAnnealer {
    /// Create an annealer over `num_bits`-bit states.
    pub fn new(num_bits: usize) -> Self {
        Self {
            num_bits,
            steps: 100,
            seed: None,
        }
    }

    /// Set the number of proposal steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Seed the proposal stream.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Run the walk, minimizing `cost`.
    #[instrument(skip_all, fields(bits = self.num_bits, steps = self.steps))]
    pub fn run<F>(&self, mut cost: F) -> AlgoResult<AnnealingResult>
    where
        F: FnMut(u64) -> f64,
    {
        check_register_width(self.num_bits)?;
        if self.steps == 0 {
            return Err(AlgoError::InvalidConfiguration(
                "annealing needs at least one step".into(),
            ));
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut evaluate = |state: u64| {
            let value = cost(state);
            if value.is_finite() {
                Ok(value)
            } else {
                Err(AlgoError::InvalidConfiguration(format!(
                    "cost of state {state} is not finite: {value}"
                )))
            }
        };

        let initial_state = rng.gen_range(0..1u64 << self.num_bits);
        let initial_cost = evaluate(initial_state)?;
        let (mut current, mut current_cost) = (initial_state, initial_cost);
        let (mut best, mut best_cost) = (initial_state, initial_cost);
        let mut cost_trace = Vec::with_capacity(self.steps);
        let mut accepted = 0;

        for step in 0..self.steps {
            let t = temperature(step, self.steps);
            let flips = if rng.r#gen::<f64>() < tunnelling_probability(step, self.steps) {
                rng.gen_range(1..=self.num_bits)
            } else {
                1
            };

            let mut candidate = current;
            for _ in 0..flips {
                candidate ^= 1u64 << rng.gen_range(0..self.num_bits);
            }

            let candidate_cost = evaluate(candidate)?;
            let delta = candidate_cost - current_cost;
            if rng.r#gen::<f64>() < acceptance_probability(delta, t) {
                current = candidate;
                current_cost = candidate_cost;
                accepted += 1;
                if current_cost < best_cost {
                    best = current;
                    best_cost = current_cost;
                    debug!("Annealing step {}: new best {} (cost {:.6})", step, best, best_cost);
                }
            }
            cost_trace.push(current_cost);
        }

        info!(
            "Annealing finished: best state {} with cost {:.6} ({} of {} moves accepted)",
            best, best_cost, accepted, self.steps
        );

        Ok(AnnealingResult {
            best_state: best,
            best_cost,
            initial_state,
            initial_cost,
            cost_trace,
            accepted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule() {
        assert_eq!(temperature(0, 100), 1.0);
        assert!((temperature(50, 100) - 0.5).abs() < 1e-12);
        assert_eq!(tunnelling_probability(0, 100), 1.0);
        assert!(tunnelling_probability(90, 100) < 0.06);
        assert_eq!(acceptance_probability(-1.0, 0.0), 1.0);
        // Cold and uphill: essentially never
        assert!(acceptance_probability(5.0, 0.0) < 1e-200);
    }

    #[test]
    fn test_finds_isolated_minimum() {
        // Cost is the Hamming distance to 0b1011_0110.
        let target = 0b1011_0110_u64;
        let result = QuantumAnnealer::new(8)
            .with_steps(400)
            .with_seed(Some(3))
            .run(|s| f64::from((s ^ target).count_ones()))
            .unwrap();
        assert!(result.best_cost <= result.initial_cost);
        assert!(result.best_cost <= 2.0, "best cost {}", result.best_cost);
        assert_eq!(result.cost_trace.len(), 400);
    }

    #[test]
    fn test_best_never_exceeds_trace_minimum() {
        let result = QuantumAnnealer::new(5)
            .with_steps(60)
            .with_seed(Some(11))
            .run(|s| (s as f64 - 13.0).abs())
            .unwrap();
        let trace_min = result
            .cost_trace
            .iter()
            .copied()
            .fold(result.initial_cost, f64::min);
        assert_eq!(result.best_cost, trace_min);
        assert!(result.best_state < 32);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let annealer = QuantumAnnealer::new(6).with_steps(50).with_seed(Some(9));
        let cost = |s: u64| (s % 7) as f64;
        assert_eq!(annealer.run(cost).unwrap(), annealer.run(cost).unwrap());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(QuantumAnnealer::new(0).run(|_| 0.0).is_err());
        assert!(QuantumAnnealer::new(4).with_steps(0).run(|_| 0.0).is_err());
        assert!(matches!(
            QuantumAnnealer::new(4).with_seed(Some(1)).run(|_| f64::NAN),
            Err(AlgoError::InvalidConfiguration(_))
        ));
    }
}
