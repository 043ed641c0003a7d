//! qnav Circuit Representation
//!
//! Data structures describing what a quantum circuit does, independently of
//! how it is simulated.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], with qubit 0 as the most significant bit of a
//!   basis-state index
//! - **Gates**: [`GateOp`], the closed gate set (H, P, X, Z, CX, Ry, Rz, CP and
//!   the multi-controlled phase flip)
//! - **Programs**: [`CircuitProgram`], an ordered, width-checked gate list
//!   with builder methods and composite fragments such as the inverse QFT
//!
//! # Example
//!
//! ```rust
//! use qnav_ir::{CircuitProgram, QubitId};
//!
//! let mut program = CircuitProgram::new("bell", 2);
//! program.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//!
//! assert_eq!(program.len(), 2);
//! assert!(program.x(QubitId(5)).is_err());
//! # Ok::<(), qnav_ir::IrError>(())
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

pub use circuit::CircuitProgram;
pub use error::{IrError, IrResult};
pub use gate::GateOp;
pub use qubit::{QubitId, basis_label, bit_of};
