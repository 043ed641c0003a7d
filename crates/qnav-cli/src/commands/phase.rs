//! Phase estimation command implementation.

use anyhow::Result;

use qnav_algos::QnavConfig;
use qnav_algos::api::run_phase_estimation;

use super::common::{Output, print_distribution, print_field, print_header};

/// Execute the phase command.
pub fn execute(num_qubits: usize, phase: f64, config: &QnavConfig, output: Output) -> Result<()> {
    let record = run_phase_estimation(num_qubits, phase, config)?;
    if output.emit_json(&record)? {
        return Ok(());
    }

    print_header(
        "Trajectory prediction",
        &format!("({num_qubits} counting qubits, phase {phase:.6})"),
    );
    print_field("Precision", format!("1/{}", record.precision));
    print_field("Most likely", &record.most_likely);
    print_field("Estimated phase", format!("{:.6}", record.estimated_phase));
    print_field(
        "Error",
        format!("{:.6}", (record.estimated_phase - record.input_phase).abs()),
    );
    print_distribution("Counting register", &record.probabilities);
    output.print_circuit(&record.circuit);
    Ok(())
}
