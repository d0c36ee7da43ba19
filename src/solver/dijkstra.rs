use grid_util::point::Point;

use crate::grid::Movement;
use crate::solver::Strategy;

/// Uniform-cost search. With a zero estimate the frontier orders cells by
/// accumulated distance alone, so cells finalize in expanding rings of true
/// distance from the start.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl Strategy for DijkstraSolver {
    fn heuristic(&self, _movement: Movement, _from: &Point, _to: &Point) -> i32 {
        0
    }
}
