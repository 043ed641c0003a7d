//! Navigation adapters over the algorithm records.
//!
//! Route selection encodes candidate routes as basis states and lets Grover
//! amplify the well-scored ones. Trajectory prediction reads the heading of a
//! velocity vector as a phase and ranks the exact phase-estimation outcomes.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{info, instrument};

use qnav_sim::run;

use crate::api::{GroverRecord, run_grover};
use crate::circuits::phase_estimation_circuit;
use crate::config::QnavConfig;
use crate::error::{AlgoError, AlgoResult};

/// Routes scoring at least this much are marked for amplification.
pub const ROUTE_SCORE_THRESHOLD: f64 = 0.75;

/// Number of ranked outcomes in a trajectory prediction.
pub const TRAJECTORY_POINTS: usize = 10;

/// Seconds between consecutive phase buckets.
pub const TIME_STEP_SECONDS: f64 = 10.0;

/// A scored route candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCandidate {
    pub name: String,
    pub total_score: f64,
}

impl RouteCandidate {
    pub fn new(name: impl Into<String>, total_score: f64) -> Self {
        Self {
            name: name.into(),
            total_score,
        }
    }
}

/// Outcome of Grover route selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSelection {
    /// Index of the chosen route.
    pub index: usize,
    /// The chosen route.
    pub route: RouteCandidate,
    /// Routes that cleared the score threshold.
    pub marked_routes: Vec<usize>,
    /// The underlying search.
    pub search: GroverRecord,
}

/// One ranked phase-estimation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    /// Exact probability of the outcome.
    pub probability: f64,
    /// Phase the outcome stands for.
    pub phase: f64,
    /// Outcome index times [`TIME_STEP_SECONDS`].
    pub time_offset: f64,
}

/// Ranked trajectory outcomes for one velocity vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPrediction {
    /// Heading `atan2(vy, vx)` fed to phase estimation.
    pub orbital_phase: f64,
    /// Most likely outcomes first.
    pub points: Vec<TrajectoryPoint>,
}

/// Register width that indexes `num_routes` routes; at least one qubit.
pub fn route_register_width(num_routes: usize) -> usize {
    num_routes.next_power_of_two().trailing_zeros().max(1) as usize
}

/// Indices of routes at or above [`ROUTE_SCORE_THRESHOLD`], or `[0]` when
/// none qualify.
pub fn marked_routes(routes: &[RouteCandidate]) -> Vec<usize> {
    let marked: Vec<usize> = routes
        .iter()
        .enumerate()
        .filter(|(_, r)| r.total_score >= ROUTE_SCORE_THRESHOLD)
        .map(|(i, _)| i)
        .collect();
    if marked.is_empty() { vec![0] } else { marked }
}

/// Pick a route by Grover search over the marked candidates.
///
/// The measured state is reduced modulo the number of routes, since the
/// register may index more states than there are routes.
#[instrument(skip_all, fields(routes = routes.len()))]
pub fn select_route(routes: &[RouteCandidate], config: &QnavConfig) -> AlgoResult<RouteSelection> {
    if routes.is_empty() {
        return Err(AlgoError::InvalidConfiguration(
            "route selection needs at least one candidate".into(),
        ));
    }
    let marked = marked_routes(routes);
    let targets: Vec<u64> = marked.iter().map(|&i| i as u64).collect();
    let search = run_grover(route_register_width(routes.len()), &targets, config)?;

    let index = usize::try_from(search.found_state).unwrap_or(usize::MAX) % routes.len();
    info!(
        "Selected route {} ('{}') after {} Grover iterations",
        index, routes[index].name, search.iterations
    );
    Ok(RouteSelection {
        index,
        route: routes[index].clone(),
        marked_routes: marked,
        search,
    })
}

/// Rank the exact phase-estimation outcomes for heading `atan2(vy, vx)`.
#[instrument(skip(config))]
pub fn predict_trajectory(
    counting_qubits: usize,
    vx: f64,
    vy: f64,
    config: &QnavConfig,
) -> AlgoResult<TrajectoryPrediction> {
    config.validate()?;
    let orbital_phase = vy.atan2(vx);
    let program = phase_estimation_circuit(counting_qubits, orbital_phase)?;
    let state = run(&program)?;

    // The eigenstate qubit is the least significant bit.
    let mut marginal = vec![0.0; 1usize << counting_qubits];
    for (index, p) in state.probabilities().into_iter().enumerate() {
        marginal[index >> 1] += p;
    }

    let mut ranked: Vec<(usize, f64)> = marginal.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let buckets = (1usize << counting_qubits) as f64;
    let points = ranked
        .into_iter()
        .take(TRAJECTORY_POINTS)
        .map(|(index, probability)| TrajectoryPoint {
            probability,
            phase: TAU * index as f64 / buckets,
            time_offset: index as f64 * TIME_STEP_SECONDS,
        })
        .collect();

    Ok(TrajectoryPrediction {
        orbital_phase,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn seeded() -> QnavConfig {
        QnavConfig {
            seed: Some(21),
            ..QnavConfig::default()
        }
    }

    #[test]
    fn test_register_width() {
        assert_eq!(route_register_width(1), 1);
        assert_eq!(route_register_width(2), 1);
        assert_eq!(route_register_width(3), 2);
        assert_eq!(route_register_width(8), 3);
        assert_eq!(route_register_width(9), 4);
    }

    #[test]
    fn test_marked_routes_threshold_and_fallback() {
        let routes = vec![
            RouteCandidate::new("a", 0.5),
            RouteCandidate::new("b", 0.75),
            RouteCandidate::new("c", 0.9),
        ];
        assert_eq!(marked_routes(&routes), vec![1, 2]);

        let poor = vec![RouteCandidate::new("a", 0.1), RouteCandidate::new("b", 0.2)];
        assert_eq!(marked_routes(&poor), vec![0]);
    }

    #[test]
    fn test_select_single_good_route() {
        let routes: Vec<RouteCandidate> = (0..8)
            .map(|i| RouteCandidate::new(format!("r{i}"), if i == 5 { 0.95 } else { 0.3 }))
            .collect();
        let selection = select_route(&routes, &seeded()).unwrap();
        assert_eq!(selection.index, 5);
        assert_eq!(selection.route.name, "r5");
        assert_eq!(selection.marked_routes, vec![5]);
        assert!(selection.search.target_probability > 0.9);
    }

    #[test]
    fn test_select_route_index_in_range() {
        let routes = vec![
            RouteCandidate::new("a", 0.8),
            RouteCandidate::new("b", 0.1),
            RouteCandidate::new("c", 0.2),
        ];
        let selection = select_route(&routes, &seeded()).unwrap();
        assert!(selection.index < routes.len());
    }

    #[test]
    fn test_empty_routes_rejected() {
        assert!(select_route(&[], &seeded()).is_err());
    }

    #[test]
    fn test_trajectory_exact_heading() {
        // Heading π/4 with three counting qubits lands on bucket 1 exactly.
        let prediction = predict_trajectory(3, 1.0, 1.0, &seeded()).unwrap();
        assert!((prediction.orbital_phase - PI / 4.0).abs() < 1e-12);
        assert_eq!(prediction.points.len(), 8);
        let top = &prediction.points[0];
        assert!((top.probability - 1.0).abs() < 1e-9);
        assert!((top.phase - PI / 4.0).abs() < 1e-12);
        assert_eq!(top.time_offset, 10.0);
    }

    #[test]
    fn test_trajectory_truncated_and_sorted() {
        let prediction = predict_trajectory(5, 0.3, 0.8, &seeded()).unwrap();
        assert_eq!(prediction.points.len(), TRAJECTORY_POINTS);
        assert!(
            prediction
                .points
                .windows(2)
                .all(|w| w[0].probability >= w[1].probability)
        );
    }
}
