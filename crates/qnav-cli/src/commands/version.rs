//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum-inspired navigation on a state-vector simulator",
        style("qnav").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qnav-ir      Circuit program representation");
    println!("  qnav-sim     State-vector simulator and sampler");
    println!("  qnav-algos   Grover, VQE and phase estimation");
    println!("  qnav-cli     Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
