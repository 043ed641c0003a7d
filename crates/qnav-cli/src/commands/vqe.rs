//! VQE command implementation.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use qnav_algos::QnavConfig;
use qnav_algos::api::run_vqe_with_observer;

use super::common::{Output, print_distribution, print_field, print_header};

/// Execute the vqe command.
pub fn execute(num_qubits: usize, config: &QnavConfig, output: Output) -> Result<()> {
    if !output.json {
        print_header(
            "Fuel optimization",
            &format!("({num_qubits} qubits, {} steps)", config.vqe.steps),
        );
    }

    let progress = if output.json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(config.vqe.steps as u64);
        pb.set_style(
            ProgressStyle::with_template("  {bar:40.cyan/blue} {pos:>4}/{len} {msg}")?
                .progress_chars("█▓░"),
        );
        pb
    };

    let result = run_vqe_with_observer(num_qubits, config, |_, energy| {
        progress.inc(1);
        progress.set_message(format!("E = {energy:.6}"));
    });
    progress.finish_and_clear();
    let record = result?;

    if output.emit_json(&record)? {
        return Ok(());
    }

    print_field("Initial energy", format!("{:.6}", record.initial_energy));
    print_field("Minimum energy", format!("{:.6}", record.minimum_energy));
    print_field(
        "Fuel savings",
        format!("{:.2}%", record.fuel_savings_percent),
    );
    print_distribution("Final state", &record.final_probabilities);
    output.print_circuit(&record.circuit);
    Ok(())
}
