//! Descent rules for variational optimization.
//!
//! A [`DescentRule`] maps the current parameters and an objective to the
//! next parameters. The VQE loop owns the iteration count and the trace; a
//! rule only decides where to step.

mod gradient_descent;

pub use gradient_descent::{GradientDescent, central_difference_gradient};

use crate::error::AlgoResult;

/// One step of a parameter-update strategy.
pub trait DescentRule {
    /// Short name for logs and reports.
    fn name(&self) -> &str;

    /// Compute the parameters that follow `params`.
    fn next_params<F>(&self, params: &[f64], objective: &mut F) -> AlgoResult<Vec<f64>>
    where
        F: FnMut(&[f64]) -> AlgoResult<f64>;
}
