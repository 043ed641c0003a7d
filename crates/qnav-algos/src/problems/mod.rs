//! Problem definitions for the variational optimizer and the annealer.

pub mod collision;
pub mod hamiltonian;

pub use collision::{CollisionProblem, Point};
pub use hamiltonian::DiagonalHamiltonian;
