//! Plain gradient descent with finite-difference gradients.

use super::DescentRule;
use crate::error::{AlgoError, AlgoResult};

/// Fixed-step gradient descent: `θ ← θ − η·∇E(θ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDescent {
    /// Step size η.
    pub stepsize: f64,
    /// Half-width of the central difference.
    pub fd_step: f64,
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self {
            stepsize: 0.4,
            fd_step: 1e-6,
        }
    }
}

impl GradientDescent {
    /// Create a gradient descent rule with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step size.
    pub fn with_stepsize(mut self, stepsize: f64) -> Self {
        self.stepsize = stepsize;
        self
    }

    /// Set the finite-difference half-width.
    pub fn with_fd_step(mut self, fd_step: f64) -> Self {
        self.fd_step = fd_step;
        self
    }
}

impl DescentRule for GradientDescent {
    fn name(&self) -> &str {
        "gradient_descent"
    }

    fn next_params<F>(&self, params: &[f64], objective: &mut F) -> AlgoResult<Vec<f64>>
    where
        F: FnMut(&[f64]) -> AlgoResult<f64>,
    {
        if !(self.stepsize.is_finite() && self.fd_step.is_finite() && self.fd_step > 0.0) {
            return Err(AlgoError::InvalidConfiguration(format!(
                "gradient descent needs finite stepsize and positive fd_step, got {} and {}",
                self.stepsize, self.fd_step
            )));
        }
        let gradient = central_difference_gradient(params, self.fd_step, objective)?;
        Ok(params
            .iter()
            .zip(&gradient)
            .map(|(p, g)| p - self.stepsize * g)
            .collect())
    }
}

/// `∂E/∂θ_i ≈ (E(θ + h·e_i) − E(θ − h·e_i)) / 2h` for every parameter.
pub fn central_difference_gradient<F>(params: &[f64], h: f64, objective: &mut F) -> AlgoResult<Vec<f64>>
where
    F: FnMut(&[f64]) -> AlgoResult<f64>,
{
    let mut shifted = params.to_vec();
    let mut gradient = Vec::with_capacity(params.len());
    for i in 0..params.len() {
        shifted[i] = params[i] + h;
        let plus = objective(&shifted)?;
        shifted[i] = params[i] - h;
        let minus = objective(&shifted)?;
        shifted[i] = params[i];
        gradient.push((plus - minus) / (2.0 * h));
    }
    Ok(gradient)
}
