//! qnav Algorithms
//!
//! Navigation-themed quantum algorithms built on the qnav state-vector
//! simulator:
//!
//! - **Superposition sampling**: environment prediction from an
//!   interference circuit
//! - **Grover search**: route search by amplitude amplification
//! - **VQE**: fuel optimization by minimizing a diagonal Hamiltonian
//! - **Phase estimation**: trajectory prediction from a controlled phase
//! - **Annealing**: collision avoidance by a tunnelling random walk
//!
//! The [`api`] module wraps each algorithm in a function returning a plain
//! serializable record. [`navigation`] layers route selection and trajectory
//! ranking on top of those records.
//!
//! # Example
//!
//! ```rust
//! use qnav_algos::QnavConfig;
//! use qnav_algos::api::run_phase_estimation;
//!
//! let config = QnavConfig { seed: Some(1), ..QnavConfig::default() };
//! let record = run_phase_estimation(3, std::f64::consts::PI / 4.0, &config)?;
//! assert_eq!(record.most_likely, "001");
//! # Ok::<(), qnav_algos::AlgoError>(())
//! ```

pub mod api;
pub mod circuits;
pub mod config;
pub mod error;
pub mod navigation;
pub mod optimizers;
pub mod problems;
pub mod runners;

pub use config::QnavConfig;
pub use error::{AlgoError, AlgoResult};
