//! Annealing command implementation.

use anyhow::{Context, Result, bail};

use qnav_algos::QnavConfig;
use qnav_algos::api::run_annealing;
use qnav_algos::problems::{CollisionProblem, Point};

use super::common::{Output, print_field, print_header};

/// Parse a hazard written as `x:y`.
pub fn parse_hazard(s: &str) -> Result<Point> {
    let Some((x, y)) = s.split_once(':') else {
        bail!("expected a hazard as x:y, got '{s}'");
    };
    let x = x.trim().parse().with_context(|| format!("invalid x in '{s}'"))?;
    let y = y.trim().parse().with_context(|| format!("invalid y in '{s}'"))?;
    Ok(Point::new(x, y))
}

/// Execute the anneal command.
pub fn execute(
    num_qubits: usize,
    position: Point,
    hazards: Vec<Point>,
    config: &QnavConfig,
    output: Output,
) -> Result<()> {
    let hazard_count = hazards.len();
    let problem = CollisionProblem::new(position, hazards)?;
    let record = run_annealing(num_qubits, &problem, config)?;
    if output.emit_json(&record)? {
        return Ok(());
    }

    print_header(
        "Collision avoidance",
        &format!(
            "({num_qubits} qubits, {hazard_count} hazards, {} steps)",
            record.steps
        ),
    );
    print_field(
        "Best adjustment",
        format!("{} ({})", record.best_label, record.best_state),
    );
    print_field("Initial cost", format!("{:.4}", record.initial_cost));
    print_field("Best cost", format!("{:.4}", record.cost));
    print_field(
        "Safety",
        format!("{:.1}%", record.safety_improvement),
    );
    print_field(
        "Accepted moves",
        format!("{}/{}", record.accepted, record.steps),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hazard() {
        assert_eq!(parse_hazard("0.5:-1.25").unwrap(), Point::new(0.5, -1.25));
        assert_eq!(parse_hazard(" 1 : 2 ").unwrap(), Point::new(1.0, 2.0));
        assert!(parse_hazard("0.5").is_err());
        assert!(parse_hazard("a:1").is_err());
    }
}
