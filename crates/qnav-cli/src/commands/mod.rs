//! CLI command implementations.

pub mod anneal;
pub mod common;
pub mod grover;
pub mod phase;
pub mod route;
pub mod status;
pub mod superposition;
pub mod trajectory;
pub mod version;
pub mod vqe;
