//! VQE (Variational Quantum Eigensolver) runner.
//!
//! The loop alternates between evaluating the ansatz energy exactly from the
//! state vector and asking a [`DescentRule`] for the next parameters. Every
//! evaluated point is recorded in an [`OptimizationTrace`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use tracing::{debug, info, instrument};

use qnav_sim::{probabilities, run};

use crate::circuits::{hardware_efficient_ansatz, num_parameters};
use crate::error::{AlgoError, AlgoResult};
use crate::optimizers::{DescentRule, GradientDescent};
use crate::problems::DiagonalHamiltonian;

/// One evaluated point of the descent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Parameters at this step.
    pub params: Vec<f64>,
    /// Energy of the ansatz at `params`.
    pub energy: f64,
}

/// Append-only record of a descent run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizationTrace {
    steps: Vec<TraceStep>,
}

impl OptimizationTrace {
    fn push(&mut self, params: Vec<f64>, energy: f64) {
        self.steps.push(TraceStep { params, energy });
    }

    /// Recorded steps in order.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Energies in order.
    pub fn energies(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.energy).collect()
    }

    /// The step with the lowest energy; the earliest one on ties.
    pub fn minimum(&self) -> Option<&TraceStep> {
        self.steps
            .iter()
            .reduce(|best, s| if s.energy < best.energy { s } else { best })
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Result of a VQE run.
#[derive(Debug, Clone)]
pub struct VqeResult {
    /// Lowest energy anywhere in the trace.
    pub minimum_energy: f64,
    /// Parameters that produced `minimum_energy`.
    pub minimum_params: Vec<f64>,
    /// Energy at the initial parameters.
    pub initial_energy: f64,
    /// Every evaluated step.
    pub trace: OptimizationTrace,
    /// Parameters after the last descent step.
    pub final_params: Vec<f64>,
    /// Exact basis-state probabilities at `final_params`.
    pub final_probabilities: BTreeMap<u64, f64>,
}

impl VqeResult {
    /// Energy history during optimization.
    pub fn energy_history(&self) -> Vec<f64> {
        self.trace.energies()
    }

    /// `(1 − |E_min| / |E_0|) · 100`, or 0 when the initial energy is 0.
    pub fn fuel_savings_percent(&self) -> f64 {
        if self.initial_energy == 0.0 {
            return 0.0;
        }
        (1.0 - self.minimum_energy.abs() / self.initial_energy.abs()) * 100.0
    }
}

/// VQE runner configuration.
#[derive(Debug, Clone)]
pub struct VqeRunner<D = GradientDescent> {
    hamiltonian: DiagonalHamiltonian,
    steps: usize,
    seed: Option<u64>,
    rule: D,
}

impl VqeRunner<GradientDescent> {
    /// Create a runner with plain gradient descent.
    pub fn new(hamiltonian: DiagonalHamiltonian) -> Self {
        Self {
            hamiltonian,
            steps: 50,
            seed: None,
            rule: GradientDescent::default(),
        }
    }
}

impl<D: DescentRule> VqeRunner<D> {
    /// Set the number of descent steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Seed the parameter initialization.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Swap the descent rule.
    pub fn with_rule<R: DescentRule>(self, rule: R) -> VqeRunner<R> {
        VqeRunner {
            hamiltonian: self.hamiltonian,
            steps: self.steps,
            seed: self.seed,
            rule,
        }
    }

    /// Get the number of parameters needed.
    pub fn num_parameters(&self) -> usize {
        num_parameters(self.hamiltonian.num_qubits())
    }

    /// Run VQE from parameters drawn uniformly in `[0, 2π)`.
    pub fn run(&self) -> AlgoResult<VqeResult> {
        self.run_with_observer(|_, _| {})
    }

    /// Like [`VqeRunner::run`], calling `observer(step, energy)` after each
    /// recorded step.
    pub fn run_with_observer<O>(&self, observer: O) -> AlgoResult<VqeResult>
    where
        O: FnMut(usize, f64),
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let initial: Vec<f64> = (0..self.num_parameters())
            .map(|_| rng.gen_range(0.0..TAU))
            .collect();
        self.run_with_params(initial, observer)
    }

    /// Run VQE with specified initial parameters.
    #[instrument(skip_all, fields(qubits = self.hamiltonian.num_qubits(), steps = self.steps, rule = self.rule.name()))]
    pub fn run_with_params<O>(&self, initial_params: Vec<f64>, mut observer: O) -> AlgoResult<VqeResult>
    where
        O: FnMut(usize, f64),
    {
        if self.steps == 0 {
            return Err(AlgoError::InvalidConfiguration(
                "VQE needs at least one descent step".into(),
            ));
        }
        if initial_params.len() != self.num_parameters() {
            return Err(AlgoError::InvalidConfiguration(format!(
                "expected {} initial parameters, got {}",
                self.num_parameters(),
                initial_params.len()
            )));
        }

        let hamiltonian = &self.hamiltonian;
        let mut objective = |params: &[f64]| evaluate_energy(hamiltonian, params);

        let mut trace = OptimizationTrace::default();
        let mut params = initial_params;
        for step in 0..self.steps {
            let energy = objective(&params)?;
            debug!("VQE step {}: energy = {:.6}", step, energy);
            let next = self.rule.next_params(&params, &mut objective)?;
            trace.push(std::mem::replace(&mut params, next), energy);
            observer(step, energy);
        }

        let (minimum_energy, minimum_params) = trace
            .minimum()
            .map(|best| (best.energy, best.params.clone()))
            .ok_or_else(|| AlgoError::InvalidConfiguration("optimization trace is empty".into()))?;
        let initial_energy = trace.energies()[0];

        let final_state = run(&hardware_efficient_ansatz(hamiltonian.num_qubits(), &params)?)?;
        let final_probabilities = probabilities(&final_state);

        info!(
            "VQE finished: initial energy {:.6}, minimum energy {:.6}",
            initial_energy, minimum_energy
        );

        Ok(VqeResult {
            minimum_energy,
            minimum_params,
            initial_energy,
            trace,
            final_params: params,
            final_probabilities,
        })
    }
}

/// Evaluate the energy expectation value for given parameters.
pub fn evaluate_energy(hamiltonian: &DiagonalHamiltonian, params: &[f64]) -> AlgoResult<f64> {
    let program = hardware_efficient_ansatz(hamiltonian.num_qubits(), params)?;
    let state = run(&program)?;
    hamiltonian.expectation(&state)
}
