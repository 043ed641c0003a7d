//! Configuration management.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QNAV_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

use crate::circuits::IterationFormula;
use crate::error::{AlgoError, AlgoResult};

/// Settings shared by every algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QnavConfig {
    /// Measurement shots per sampled execution
    #[serde(default = "default_shots")]
    pub shots: u32,

    /// Seed for sampling and parameter initialization; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Grover search settings
    #[serde(default)]
    pub grover: GroverConfig,

    /// Variational optimizer settings
    #[serde(default)]
    pub vqe: VqeConfig,

    /// Phase estimation settings
    #[serde(default)]
    pub phase_estimation: PhaseEstimationConfig,

    /// Annealing settings
    #[serde(default)]
    pub annealing: AnnealingConfig,
}

/// Grover search settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroverConfig {
    /// Iteration count formula
    #[serde(default)]
    pub iteration_formula: IterationFormula,
}

/// Variational optimizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VqeConfig {
    /// Number of descent steps
    #[serde(default = "default_vqe_steps")]
    pub steps: usize,

    /// Gradient descent step size
    #[serde(default = "default_vqe_stepsize")]
    pub stepsize: f64,

    /// Finite-difference half-width for gradients
    #[serde(default = "default_fd_step")]
    pub fd_step: f64,

    /// Per-qubit Hamiltonian weights; all 1.0 when absent
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

/// Phase estimation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseEstimationConfig {
    /// Phase used when the caller supplies none
    #[serde(default = "default_phase")]
    pub default_phase: f64,
}

/// Annealing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealingConfig {
    /// Number of proposal steps
    #[serde(default = "default_annealing_steps")]
    pub steps: usize,
}

// Default value functions
fn default_shots() -> u32 {
    1024
}

fn default_vqe_steps() -> usize {
    50
}

fn default_vqe_stepsize() -> f64 {
    0.4
}

fn default_fd_step() -> f64 {
    1e-6
}

fn default_phase() -> f64 {
    PI / 4.0
}

fn default_annealing_steps() -> usize {
    100
}

impl Default for QnavConfig {
    fn default() -> Self {
        QnavConfig {
            shots: default_shots(),
            seed: None,
            grover: GroverConfig::default(),
            vqe: VqeConfig::default(),
            phase_estimation: PhaseEstimationConfig::default(),
            annealing: AnnealingConfig::default(),
        }
    }
}

impl Default for VqeConfig {
    fn default() -> Self {
        VqeConfig {
            steps: default_vqe_steps(),
            stepsize: default_vqe_stepsize(),
            fd_step: default_fd_step(),
            weights: None,
        }
    }
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        AnnealingConfig {
            steps: default_annealing_steps(),
        }
    }
}

impl Default for PhaseEstimationConfig {
    fn default() -> Self {
        PhaseEstimationConfig {
            default_phase: default_phase(),
        }
    }
}

impl QnavConfig {
    /// Parse configuration from a YAML file.
    ///
    /// Values are not validated here; [`QnavConfig::load`] validates once
    /// environment overrides have been applied.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AlgoResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AlgoError::Config(format!("{}: {e}", path.display())))?;

        serde_yaml_ng::from_str(&contents)
            .map_err(|e| AlgoError::Config(format!("{}: {e}", path.display())))
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> AlgoResult<Self> {
        Self::load_with(config_file, |key| std::env::var(key).ok())
    }

    /// Like [`QnavConfig::load`], reading variables through `lookup`.
    pub fn load_with<F>(config_file: Option<&Path>, lookup: F) -> AlgoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => QnavConfig::default(),
        };

        let config = config.merge_env_from(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Merge variables from `lookup` into this configuration.
    ///
    /// Only variables that are present override the current values. A present
    /// but unparsable value is an error rather than silently ignored.
    pub fn merge_env_from<F>(mut self, lookup: F) -> AlgoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QNAV_SHOTS") {
            self.shots = parse_var("QNAV_SHOTS", &v)?;
        }
        if let Some(v) = lookup("QNAV_SEED") {
            self.seed = Some(parse_var("QNAV_SEED", &v)?);
        }
        if let Some(v) = lookup("QNAV_VQE_STEPS") {
            self.vqe.steps = parse_var("QNAV_VQE_STEPS", &v)?;
        }
        if let Some(v) = lookup("QNAV_VQE_STEPSIZE") {
            self.vqe.stepsize = parse_var("QNAV_VQE_STEPSIZE", &v)?;
        }
        if let Some(v) = lookup("QNAV_ANNEALING_STEPS") {
            self.annealing.steps = parse_var("QNAV_ANNEALING_STEPS", &v)?;
        }
        Ok(self)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> AlgoResult<()> {
        if self.shots == 0 {
            return Err(AlgoError::InvalidConfiguration(
                "shots must be at least 1".into(),
            ));
        }
        if self.vqe.steps == 0 {
            return Err(AlgoError::InvalidConfiguration(
                "vqe.steps must be at least 1".into(),
            ));
        }
        if !self.vqe.stepsize.is_finite() {
            return Err(AlgoError::InvalidConfiguration(format!(
                "vqe.stepsize must be finite, got {}",
                self.vqe.stepsize
            )));
        }
        if !(self.vqe.fd_step.is_finite() && self.vqe.fd_step > 0.0) {
            return Err(AlgoError::InvalidConfiguration(format!(
                "vqe.fd_step must be positive, got {}",
                self.vqe.fd_step
            )));
        }
        if self.annealing.steps == 0 {
            return Err(AlgoError::InvalidConfiguration(
                "annealing.steps must be at least 1".into(),
            ));
        }
        if !self.phase_estimation.default_phase.is_finite() {
            return Err(AlgoError::InvalidConfiguration(
                "phase_estimation.default_phase must be finite".into(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> AlgoResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AlgoError::Config(format!("{key}: cannot parse '{value}'")))
}
