//! Trajectory prediction command implementation.

use anyhow::Result;
use console::style;

use qnav_algos::QnavConfig;
use qnav_algos::navigation::predict_trajectory;

use super::common::{Output, print_field, print_header};

/// Execute the trajectory command.
pub fn execute(
    num_qubits: usize,
    vx: f64,
    vy: f64,
    config: &QnavConfig,
    output: Output,
) -> Result<()> {
    let prediction = predict_trajectory(num_qubits, vx, vy, config)?;
    if output.emit_json(&prediction)? {
        return Ok(());
    }

    print_header(
        "Trajectory prediction",
        &format!("({num_qubits} counting qubits, velocity ({vx}, {vy}))"),
    );
    print_field("Orbital phase", format!("{:.6}", prediction.orbital_phase));
    println!("\n{} Ranked outcomes:", style("✓").green().bold());
    for point in &prediction.points {
        println!(
            "  t+{:>5.0}s  phase {:>8.4}  {:>6.2}%",
            point.time_offset,
            point.phase,
            point.probability * 100.0
        );
    }
    Ok(())
}
