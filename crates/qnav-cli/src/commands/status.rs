//! Status command implementation.

use anyhow::Result;
use console::style;

use qnav_algos::QnavConfig;
use qnav_algos::api::status;

use super::common::{Output, print_field};

/// Execute the status command.
pub fn execute(config: &QnavConfig, output: Output) -> Result<()> {
    let record = status(config);
    if output.emit_json(&record)? {
        return Ok(());
    }

    println!(
        "{} {} is {}",
        style("●").green().bold(),
        style(&record.backend).cyan(),
        style(&record.status).green()
    );
    print_field("Version", &record.version);
    print_field("Shots", record.shots);
    print_field("Max qubits", record.max_qubits);
    print_field("Algorithms", record.available_algorithms.join(", "));
    Ok(())
}
