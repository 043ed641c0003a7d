//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building a circuit program.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A gate references a qubit outside the register.
    #[error("Qubit {qubit} is out of range for a {num_qubits}-qubit register{}", format_gate_context(.gate_name))]
    InvalidQubitIndex {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the register the gate was applied to.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The same qubit appears twice in one gate.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A multi-qubit gate was given no qubits at all.
    #[error("Gate '{0}' needs at least one qubit")]
    EmptyQubitSet(String),
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
