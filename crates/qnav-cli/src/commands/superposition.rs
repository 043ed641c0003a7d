//! Superposition command implementation.

use anyhow::Result;

use qnav_algos::QnavConfig;
use qnav_algos::api::run_superposition;

use super::common::{Output, print_distribution, print_field, print_header};

/// Execute the superposition command.
pub fn execute(num_qubits: usize, config: &QnavConfig, output: Output) -> Result<()> {
    let record = run_superposition(num_qubits, config)?;
    if output.emit_json(&record)? {
        return Ok(());
    }

    print_header(
        "Environment prediction",
        &format!("({num_qubits} qubits, {} shots)", config.shots),
    );
    print_field("Observed outcomes", record.probabilities.len());
    print_distribution("Outcome frequencies", &record.probabilities);
    output.print_circuit(&record.circuit);
    Ok(())
}
