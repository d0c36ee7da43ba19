use grid_util::point::Point;

use crate::grid::Movement;
use crate::{DIAGONAL_COST, STRAIGHT_COST};

pub mod astar;
pub mod dijkstra;

pub use astar::AstarSolver;
pub use dijkstra::DijkstraSolver;

/// The single point where the two search strategies differ: the estimate of
/// the remaining cost added to a cell's accumulated cost when it is pushed
/// onto the frontier. The rest of the state machine is shared.
pub trait Strategy {
    /// Estimated cost from `from` to `to` under the given movement model.
    /// Must never overestimate the true remaining cost for the search to
    /// stay optimal.
    fn heuristic(&self, movement: Movement, from: &Point, to: &Point) -> i32;
}

/// Cost of one move between the adjacent cells `from` and `to`.
pub fn step_cost(from: &Point, to: &Point) -> i32 {
    debug_assert!((from.x - to.x).abs() <= 1 && (from.y - to.y).abs() <= 1);
    if from.x != to.x && from.y != to.y {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}

/// Exact cost of the cheapest unobstructed route between two cells: the
/// Manhattan distance for cardinal movement, the octile distance when
/// diagonal moves are allowed (take as many diagonal steps as the shorter
/// axis permits, then go straight).
pub fn free_route_cost(movement: Movement, from: &Point, to: &Point) -> i32 {
    let delta_x = (from.x - to.x).abs();
    let delta_y = (from.y - to.y).abs();
    match movement {
        Movement::FourDirectional => (delta_x + delta_y) * STRAIGHT_COST,
        Movement::EightDirectional => {
            let diagonal_steps = delta_x.min(delta_y);
            let straight_steps = (delta_x - delta_y).abs();
            diagonal_steps * DIAGONAL_COST + straight_steps * STRAIGHT_COST
        }
    }
}

/// Total cost of a reconstructed path, summing per-move step costs.
pub fn path_cost(path: &[Point]) -> i32 {
    path.windows(2).map(|w| step_cost(&w[0], &w[1])).sum()
}

/// Converts an integer cost to the equivalent number of straight steps.
pub fn cost_as_steps(cost: i32) -> f64 {
    f64::from(cost) / f64::from(STRAIGHT_COST)
}
