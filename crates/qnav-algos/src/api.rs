//! Record-returning entry points.
//!
//! Each function validates its inputs, runs one algorithm with fresh state
//! and returns a plain serializable record. Nothing is shared between calls,
//! so they may run concurrently on separate threads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qnav_ir::basis_label;
use qnav_sim::MAX_QUBITS;

use crate::circuits::{hardware_efficient_ansatz, phase_estimation_circuit, superposition_circuit};
use crate::config::QnavConfig;
use crate::error::{AlgoError, AlgoResult};
use crate::optimizers::GradientDescent;
use crate::problems::{CollisionProblem, DiagonalHamiltonian};
use crate::runners::{
    GroverSearch, PhaseEstimator, QuantumAnnealer, SuperpositionRunner, VqeRunner,
};

/// Names of the algorithms exposed here.
pub const AVAILABLE_ALGORITHMS: [&str; 5] = [
    "superposition",
    "grover",
    "vqe",
    "phase_estimation",
    "annealing",
];

/// Sampled outcome frequencies of the superposition circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperpositionRecord {
    /// Frequency per observed basis label.
    pub probabilities: BTreeMap<String, f64>,
    /// Register width.
    pub num_qubits: usize,
    /// Text listing of the sampled circuit.
    pub circuit: String,
}

/// Outcome of a Grover search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroverRecord {
    /// Most frequently measured basis state.
    pub found_state: u64,
    /// Its empirical probability.
    pub probability: f64,
    /// Oracle+diffusion rounds applied.
    pub iterations: usize,
    /// Frequency per observed basis label.
    pub histogram: BTreeMap<String, f64>,
    /// Deduplicated marked states.
    pub target_states: Vec<u64>,
    /// Exact combined probability of the marked states.
    pub target_probability: f64,
    /// Text listing of the search circuit.
    pub circuit: String,
}

/// Outcome of a variational optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VqeRecord {
    /// Lowest energy in the trace.
    pub minimum_energy: f64,
    /// Energy per descent step.
    pub energy_trace: Vec<f64>,
    /// Exact probabilities at the final parameters, per basis label.
    pub final_probabilities: BTreeMap<String, f64>,
    /// Energy at the initial parameters.
    pub initial_energy: f64,
    /// Relative improvement of the minimum over the initial energy.
    pub fuel_savings_percent: f64,
    /// Text listing of the ansatz at the final parameters.
    pub circuit: String,
}

/// Outcome of a phase estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseEstimationRecord {
    /// Frequency per observed counting-register label.
    pub probabilities: BTreeMap<String, f64>,
    /// Distinguishable phase buckets, `2^m`.
    pub precision: u64,
    /// Label of the most frequent outcome.
    pub most_likely: String,
    /// Phase implied by the most frequent outcome.
    pub estimated_phase: f64,
    /// Phase that was encoded.
    pub input_phase: f64,
    /// Text listing of the estimation circuit.
    pub circuit: String,
}

/// Outcome of a collision-avoidance anneal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnealingRecord {
    /// Lowest-cost adjustment word.
    pub best_state: u64,
    /// `best_state` as a fixed-width label.
    pub best_label: String,
    /// Cost of `best_state`.
    pub cost: f64,
    /// Cost of the random starting word.
    pub initial_cost: f64,
    /// `max(0, 100 − 10·cost)`.
    pub safety_improvement: f64,
    /// Cost of the current word after every step.
    pub cost_trace: Vec<f64>,
    /// Proposal steps run.
    pub steps: usize,
    /// Proposals accepted.
    pub accepted: usize,
}

/// Static description of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    /// Always `"online"`; the engine has no external dependency.
    pub status: String,
    /// Simulator name.
    pub backend: String,
    /// Library version.
    pub version: String,
    /// Configured shots.
    pub shots: u32,
    /// Largest supported register.
    pub max_qubits: usize,
    /// Algorithms callable through this module.
    pub available_algorithms: Vec<String>,
}

/// Sample the superposition circuit over `num_qubits`.
pub fn run_superposition(num_qubits: usize, config: &QnavConfig) -> AlgoResult<SuperpositionRecord> {
    config.validate()?;
    let histogram = SuperpositionRunner::new(num_qubits)
        .with_shots(config.shots)
        .with_seed(config.seed)
        .run()?;
    Ok(SuperpositionRecord {
        probabilities: histogram.to_labelled_frequencies(),
        num_qubits,
        circuit: superposition_circuit(num_qubits)?.to_string(),
    })
}

/// Search for `target_states` among `2^num_qubits` basis states.
pub fn run_grover(
    num_qubits: usize,
    target_states: &[u64],
    config: &QnavConfig,
) -> AlgoResult<GroverRecord> {
    config.validate()?;
    let search = GroverSearch::new(num_qubits, target_states)?
        .with_formula(config.grover.iteration_formula)
        .with_shots(config.shots)
        .with_seed(config.seed);
    let result = search.run()?;
    Ok(GroverRecord {
        found_state: result.found_state,
        probability: result.probability,
        iterations: result.iterations,
        histogram: result.histogram.to_labelled_frequencies(),
        target_states: search.targets().to_vec(),
        target_probability: result.target_probability,
        circuit: search.circuit()?.to_string(),
    })
}

/// Minimize the configured Hamiltonian over `num_qubits`.
pub fn run_vqe(num_qubits: usize, config: &QnavConfig) -> AlgoResult<VqeRecord> {
    run_vqe_with_observer(num_qubits, config, |_, _| {})
}

/// Like [`run_vqe`], reporting `(step, energy)` after every descent step.
pub fn run_vqe_with_observer<O>(
    num_qubits: usize,
    config: &QnavConfig,
    observer: O,
) -> AlgoResult<VqeRecord>
where
    O: FnMut(usize, f64),
{
    config.validate()?;
    let hamiltonian = match &config.vqe.weights {
        Some(weights) if weights.len() != num_qubits => {
            return Err(AlgoError::InvalidConfiguration(format!(
                "{} Hamiltonian weights configured for {num_qubits} qubits",
                weights.len()
            )));
        }
        Some(weights) => DiagonalHamiltonian::new(weights.clone())?,
        None => DiagonalHamiltonian::uniform(num_qubits)?,
    };

    let rule = GradientDescent::new()
        .with_stepsize(config.vqe.stepsize)
        .with_fd_step(config.vqe.fd_step);
    let result = VqeRunner::new(hamiltonian)
        .with_rule(rule)
        .with_steps(config.vqe.steps)
        .with_seed(config.seed)
        .run_with_observer(observer)?;

    Ok(VqeRecord {
        minimum_energy: result.minimum_energy,
        energy_trace: result.energy_history(),
        final_probabilities: result
            .final_probabilities
            .iter()
            .map(|(&index, &p)| (basis_label(index, num_qubits), p))
            .collect(),
        initial_energy: result.initial_energy,
        fuel_savings_percent: result.fuel_savings_percent(),
        circuit: hardware_efficient_ansatz(num_qubits, &result.final_params)?.to_string(),
    })
}

/// Estimate `phase` with `num_qubits` counting qubits.
pub fn run_phase_estimation(
    num_qubits: usize,
    phase: f64,
    config: &QnavConfig,
) -> AlgoResult<PhaseEstimationRecord> {
    config.validate()?;
    let result = PhaseEstimator::new(num_qubits, phase)
        .with_shots(config.shots)
        .with_seed(config.seed)
        .run()?;
    Ok(PhaseEstimationRecord {
        probabilities: result.histogram.to_labelled_frequencies(),
        precision: result.precision,
        most_likely: basis_label(result.most_likely, num_qubits),
        estimated_phase: result.estimated_phase,
        input_phase: phase,
        circuit: phase_estimation_circuit(num_qubits, phase)?.to_string(),
    })
}

/// Anneal an `num_qubits`-bit adjustment word against `problem`.
pub fn run_annealing(
    num_qubits: usize,
    problem: &CollisionProblem,
    config: &QnavConfig,
) -> AlgoResult<AnnealingRecord> {
    config.validate()?;
    let steps = config.annealing.steps;
    let result = QuantumAnnealer::new(num_qubits)
        .with_steps(steps)
        .with_seed(config.seed)
        .run(|state| problem.cost(state, num_qubits))?;
    Ok(AnnealingRecord {
        best_state: result.best_state,
        best_label: basis_label(result.best_state, num_qubits),
        cost: result.best_cost,
        initial_cost: result.initial_cost,
        safety_improvement: CollisionProblem::safety_improvement(result.best_cost),
        cost_trace: result.cost_trace,
        steps,
        accepted: result.accepted,
    })
}

/// Describe the engine.
pub fn status(config: &QnavConfig) -> StatusRecord {
    StatusRecord {
        status: "online".to_string(),
        backend: "qnav-statevector".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        shots: config.shots,
        max_qubits: MAX_QUBITS,
        available_algorithms: AVAILABLE_ALGORITHMS.iter().map(|s| (*s).to_string()).collect(),
    }
}
