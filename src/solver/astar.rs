use grid_util::point::Point;

use crate::grid::Movement;
use crate::solver::{free_route_cost, Strategy};

/// Heuristic-guided search. The estimate is the exact cost of the cheapest
/// unobstructed route to the goal, which never overestimates and so keeps
/// the search optimal at the default factor of 1.0.
#[derive(Clone, Copy, Debug)]
pub struct AstarSolver {
    /// Scales the estimate. Values above 1.0 make the search greedier and
    /// faster at the price of optimality guarantees.
    pub heuristic_factor: f32,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    pub fn weighted(heuristic_factor: f32) -> AstarSolver {
        AstarSolver { heuristic_factor }
    }
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl Strategy for AstarSolver {
    fn heuristic(&self, movement: Movement, from: &Point, to: &Point) -> i32 {
        (free_route_cost(movement, from, to) as f32 * self.heuristic_factor) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DIAGONAL_COST, STRAIGHT_COST};

    #[test]
    fn estimate_is_manhattan_on_cardinal_grids() {
        let solver = AstarSolver::new();
        let h = solver.heuristic(
            Movement::FourDirectional,
            &Point::new(0, 0),
            &Point::new(4, 4),
        );
        assert_eq!(h, 8 * STRAIGHT_COST);
    }

    #[test]
    fn estimate_is_octile_on_diagonal_grids() {
        let solver = AstarSolver::new();
        let h = solver.heuristic(
            Movement::EightDirectional,
            &Point::new(0, 0),
            &Point::new(4, 2),
        );
        assert_eq!(h, 2 * DIAGONAL_COST + 2 * STRAIGHT_COST);
    }

    #[test]
    fn factor_scales_estimate() {
        let solver = AstarSolver::weighted(1.5);
        let h = solver.heuristic(
            Movement::FourDirectional,
            &Point::new(0, 0),
            &Point::new(2, 0),
        );
        assert_eq!(h, (2.0 * STRAIGHT_COST as f32 * 1.5) as i32);
    }
}
