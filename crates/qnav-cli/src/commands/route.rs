//! Route selection command implementation.

use anyhow::Result;

use qnav_algos::QnavConfig;
use qnav_algos::navigation::{ROUTE_SCORE_THRESHOLD, RouteCandidate, select_route};

use super::common::{Output, print_distribution, print_field, print_header};

/// Execute the route command.
pub fn execute(scores: &[f64], config: &QnavConfig, output: Output) -> Result<()> {
    let routes: Vec<RouteCandidate> = scores
        .iter()
        .enumerate()
        .map(|(i, &score)| RouteCandidate::new(format!("route-{i}"), score))
        .collect();
    let selection = select_route(&routes, config)?;
    if output.emit_json(&selection)? {
        return Ok(());
    }

    print_header(
        "Route selection",
        &format!("({} candidates, threshold {ROUTE_SCORE_THRESHOLD})", routes.len()),
    );
    print_field("Marked routes", format!("{:?}", selection.marked_routes));
    print_field(
        "Selected",
        format!(
            "{} (score {:.2})",
            selection.route.name, selection.route.total_score
        ),
    );
    print_field("Iterations", selection.search.iterations);
    print_distribution("Measured routes", &selection.search.histogram);
    output.print_circuit(&selection.search.circuit);
    Ok(())
}
