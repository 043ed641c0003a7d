//! Collision-avoidance cost model for the annealer.
//!
//! A candidate is an `n`-bit adjustment word. Bit `i` (counted from the
//! least significant end) nudges the craft by `+0.1` when set and `-0.1`
//! when clear, along both axes. Each nudged position within the safety
//! radius of a hazard adds a penalty proportional to how deep it intrudes.

use serde::{Deserialize, Serialize};

use crate::error::{AlgoError, AlgoResult};

/// Offset applied per adjustment bit.
pub const ADJUSTMENT_STEP: f64 = 0.1;

/// A point in the navigation plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Hazards around a craft position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionProblem {
    position: Point,
    hazards: Vec<Point>,
    safety_radius: f64,
    penalty: f64,
}

impl CollisionProblem {
    /// Create a problem with the default radius (0.2) and penalty (10).
    pub fn new(position: Point, hazards: Vec<Point>) -> AlgoResult<Self> {
        if !position.is_finite() || hazards.iter().any(|h| !h.is_finite()) {
            return Err(AlgoError::InvalidConfiguration(
                "positions and hazards must have finite coordinates".into(),
            ));
        }
        Ok(Self {
            position,
            hazards,
            safety_radius: 0.2,
            penalty: 10.0,
        })
    }

    /// Set the distance below which a hazard is penalized.
    pub fn with_safety_radius(mut self, radius: f64) -> AlgoResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(AlgoError::InvalidConfiguration(format!(
                "safety radius must be positive, got {radius}"
            )));
        }
        self.safety_radius = radius;
        Ok(self)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn hazards(&self) -> &[Point] {
        &self.hazards
    }

    /// Cost of adjustment word `state` over `num_bits` bits.
    pub fn cost(&self, state: u64, num_bits: usize) -> f64 {
        let mut cost = 0.0;
        for bit in 0..num_bits.min(64) {
            let offset = if (state >> bit) & 1 == 1 {
                ADJUSTMENT_STEP
            } else {
                -ADJUSTMENT_STEP
            };
            let nudged = Point::new(self.position.x + offset, self.position.y + offset);
            for &hazard in &self.hazards {
                let dist = nudged.distance_to(hazard);
                if dist < self.safety_radius {
                    cost += (self.safety_radius - dist) * self.penalty;
                }
            }
        }
        cost
    }

    /// `max(0, 100 − 10·cost)`.
    pub fn safety_improvement(cost: f64) -> f64 {
        (100.0 - cost * 10.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hazards_costs_nothing() {
        let problem = CollisionProblem::new(Point::default(), vec![]).unwrap();
        assert_eq!(problem.cost(0b1010, 4), 0.0);
        assert_eq!(CollisionProblem::safety_improvement(0.0), 100.0);
    }

    #[test]
    fn test_cost_depends_on_adjustment_direction() {
        // Hazard sits on the +0.1 nudge; the -0.1 nudge is 0.28 away.
        let problem =
            CollisionProblem::new(Point::default(), vec![Point::new(0.1, 0.1)]).unwrap();
        assert_eq!(problem.cost(0b00, 2), 0.0);
        assert!((problem.cost(0b01, 2) - 2.0).abs() < 1e-12);
        assert!((problem.cost(0b11, 2) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(CollisionProblem::new(Point::new(f64::NAN, 0.0), vec![]).is_err());
        let problem = CollisionProblem::new(Point::default(), vec![]).unwrap();
        assert!(problem.with_safety_radius(0.0).is_err());
    }

    #[test]
    fn test_safety_improvement_floor() {
        assert_eq!(CollisionProblem::safety_improvement(25.0), 0.0);
        assert!((CollisionProblem::safety_improvement(1.5) - 85.0).abs() < 1e-12);
    }
}
