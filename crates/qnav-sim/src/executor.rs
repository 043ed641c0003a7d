//! Program execution.

use std::time::Instant;
use tracing::{debug, instrument};

use qnav_ir::CircuitProgram;

use crate::error::{SimError, SimResult};
use crate::statevector::StateVector;

/// Execute `program` on a fresh |0...0⟩ state of the program's width.
#[instrument(skip(program), fields(name = program.name(), qubits = program.num_qubits()))]
pub fn run(program: &CircuitProgram) -> SimResult<StateVector> {
    let mut state = StateVector::new(program.num_qubits())?;
    run_on(program, &mut state)?;
    Ok(state)
}

/// Execute `program` on an existing state, gate by gate in program order.
///
/// The state must be at least as wide as the program.
pub fn run_on(program: &CircuitProgram, state: &mut StateVector) -> SimResult<()> {
    if program.num_qubits() > state.num_qubits() {
        return Err(SimError::InvalidConfiguration(format!(
            "program '{}' needs {} qubits but the state has {}",
            program.name(),
            program.num_qubits(),
            state.num_qubits()
        )));
    }

    let start = Instant::now();
    for op in program.ops() {
        state.apply(op)?;
    }
    debug!(
        "Applied {} gates to {} qubits in {:?}",
        program.len(),
        state.num_qubits(),
        start.elapsed()
    );
    Ok(())
}
