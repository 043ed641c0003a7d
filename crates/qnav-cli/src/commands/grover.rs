//! Grover command implementation.

use anyhow::Result;
use console::style;

use qnav_algos::QnavConfig;
use qnav_algos::api::run_grover;

use super::common::{Output, print_distribution, print_field, print_header};

/// Execute the grover command.
pub fn execute(
    num_qubits: usize,
    targets: &[u64],
    config: &QnavConfig,
    output: Output,
) -> Result<()> {
    let record = run_grover(num_qubits, targets, config)?;
    if output.emit_json(&record)? {
        return Ok(());
    }

    print_header(
        "Route search",
        &format!("({num_qubits} qubits, targets {:?})", record.target_states),
    );
    print_field("Iterations", record.iterations);
    print_field(
        "Found state",
        format!("{} ({:.2}%)", record.found_state, record.probability * 100.0),
    );
    print_field(
        "Target probability",
        format!("{:.4}", record.target_probability),
    );
    if !record.target_states.contains(&record.found_state) {
        println!(
            "  {} most frequent outcome is not a marked state",
            style("!").yellow().bold()
        );
    }
    print_distribution("Measured routes", &record.histogram);
    output.print_circuit(&record.circuit);
    Ok(())
}
