use core::fmt;
use std::error::Error;

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{info, warn};
use smallvec::SmallVec;

use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::solver::{step_cost, Strategy};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Search lifecycle. A search is [SearchState::Ready] after construction,
/// [SearchState::Running] after [Algorithm::initialize] and ends in exactly
/// one of the two terminal states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Ready,
    Running,
    Succeeded,
    Failed(FailureReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// The frontier ran dry without reaching the end cell: no path exists.
    Exhausted,
    /// The run was aborted from outside.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The grid handed to the algorithm has no start or no end marker.
    NoStartOrEnd,
    /// The operation is not valid in the current [SearchState].
    InvalidState,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SearchError::NoStartOrEnd => write!(f, "grid has no start or end marker"),
            SearchError::InvalidState => {
                write!(f, "operation is not valid in the current search state")
            }
        }
    }
}

impl Error for SearchError {}

/// What a single [Algorithm::step] call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// One cell was finalized and its open neighbours relaxed; `improved`
    /// lists the neighbours whose best-known cost got better (newly
    /// discovered or rediscovered cheaper) and which therefore joined the
    /// frontier.
    Expanded {
        cell: Point,
        improved: SmallVec<[Point; 8]>,
    },
    /// The end cell was finalized; the search is now [SearchState::Succeeded].
    Reached { cell: Point },
    /// The frontier ran dry; the search is now failed.
    Exhausted,
}

/// The capability set shared by every search strategy: seed, advance one
/// expansion at a time, inspect progress, reconstruct the result.
pub trait Algorithm {
    /// Seeds the frontier with the start cell at zero accumulated cost and
    /// transitions [SearchState::Ready] to [SearchState::Running].
    fn initialize(&mut self) -> Result<(), SearchError>;
    /// Performs exactly one real expansion. Stale frontier entries (lazy
    /// deletion leftovers) are discarded internally, never surfaced.
    fn step(&mut self) -> Result<StepEvent, SearchError>;
    /// Whether the search reached a terminal state.
    fn is_complete(&self) -> bool;
    fn state(&self) -> SearchState;
    /// The path from start to end inclusive. Only valid once the search
    /// succeeded.
    fn extract_path(&self) -> Result<Vec<Point>, SearchError>;
    /// Forces a non-terminal search into [SearchState::Failed] with reason
    /// [FailureReason::Cancelled]. No effect on an already terminal search.
    fn abort(&mut self);
    /// Number of cells finalized so far.
    fn expansions(&self) -> usize;
    /// Accumulated cost of the found path, once the search succeeded.
    fn path_cost(&self) -> Option<i32>;
    /// Cells finalized so far, in expansion order.
    fn visited_cells(&self) -> Vec<Point>;
    /// Cells discovered but not yet finalized.
    fn frontier_cells(&self) -> Vec<Point>;
    /// The snapshot this search runs against.
    fn grid(&self) -> &Grid;
}

/// Per-cell bookkeeping, created lazily as cells are discovered. The cell's
/// index in the node map doubles as the back-pointer handle.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    parent: usize,
    cost: i32,
    closed: bool,
}

/// The shared search state machine, parameterized by the [Strategy] that
/// supplies the heuristic term of the frontier key.
pub struct Search<S: Strategy> {
    grid: Grid,
    strategy: S,
    start: Point,
    end: Point,
    nodes: FxIndexMap<Point, SearchNode>,
    frontier: Frontier,
    state: SearchState,
    expansions: usize,
}

impl<S: Strategy> Search<S> {
    /// Builds a search against a grid snapshot. Fails with
    /// [SearchError::NoStartOrEnd] if the grid is missing either marker,
    /// mirroring the grid-level check one layer up.
    pub fn new(grid: Grid, strategy: S) -> Result<Search<S>, SearchError> {
        let (start, end) = grid
            .start()
            .zip(grid.end())
            .ok_or(SearchError::NoStartOrEnd)?;
        Ok(Search {
            grid,
            strategy,
            start,
            end,
            nodes: FxIndexMap::default(),
            frontier: Frontier::new(),
            state: SearchState::Ready,
            expansions: 0,
        })
    }

    fn key_for(&self, cell: &Point, cost: i32) -> i32 {
        cost + self.strategy.heuristic(self.grid.movement(), cell, &self.end)
    }
}

impl<S: Strategy> Algorithm for Search<S> {
    fn initialize(&mut self) -> Result<(), SearchError> {
        if self.state != SearchState::Ready {
            return Err(SearchError::InvalidState);
        }
        if self.grid.reachable() {
            info!("{} is reachable from {}, starting search", self.end, self.start);
        } else {
            info!(
                "{} and {} are on different components, search will exhaust",
                self.end, self.start
            );
        }
        self.nodes.insert(
            self.start,
            SearchNode {
                parent: usize::MAX,
                cost: 0,
                closed: false,
            },
        );
        self.frontier.push(self.key_for(&self.start, 0), self.start);
        self.state = SearchState::Running;
        Ok(())
    }

    fn step(&mut self) -> Result<StepEvent, SearchError> {
        if self.state != SearchState::Running {
            return Err(SearchError::InvalidState);
        }
        loop {
            let Some((_key, cell)) = self.frontier.pop_min() else {
                self.state = SearchState::Failed(FailureReason::Exhausted);
                warn!("Frontier exhausted before reaching {}", self.end);
                return Ok(StepEvent::Exhausted);
            };
            let index = self.nodes.get_index_of(&cell).unwrap();
            {
                let (_, node) = self.nodes.get_index_mut(index).unwrap();
                if node.closed {
                    // Stale duplicate: a cheaper entry already finalized
                    // this cell.
                    continue;
                }
                node.closed = true;
            }
            self.expansions += 1;
            if cell == self.end {
                self.state = SearchState::Succeeded;
                return Ok(StepEvent::Reached { cell });
            }
            let cost = self.nodes[index].cost;
            let mut improved: SmallVec<[Point; 8]> = SmallVec::new();
            for neighbor in self.grid.neighbors(cell) {
                let new_cost = cost + step_cost(&cell, &neighbor);
                match self.nodes.entry(neighbor) {
                    Vacant(e) => {
                        e.insert(SearchNode {
                            parent: index,
                            cost: new_cost,
                            closed: false,
                        });
                    }
                    Occupied(mut e) => {
                        // A closed cell is final under an admissible
                        // estimate; only open cells can be relaxed.
                        if e.get().closed || e.get().cost <= new_cost {
                            continue;
                        }
                        e.insert(SearchNode {
                            parent: index,
                            cost: new_cost,
                            closed: false,
                        });
                    }
                }
                self.frontier.push(self.key_for(&neighbor, new_cost), neighbor);
                improved.push(neighbor);
            }
            return Ok(StepEvent::Expanded { cell, improved });
        }
    }

    fn is_complete(&self) -> bool {
        matches!(
            self.state,
            SearchState::Succeeded | SearchState::Failed(_)
        )
    }

    fn state(&self) -> SearchState {
        self.state
    }

    fn extract_path(&self) -> Result<Vec<Point>, SearchError> {
        if self.state != SearchState::Succeeded {
            return Err(SearchError::InvalidState);
        }
        let goal_index = self.nodes.get_index_of(&self.end).unwrap();
        let mut path: Vec<Point> = itertools::unfold(goal_index, |i| {
            self.nodes.get_index(*i).map(|(cell, node)| {
                *i = node.parent;
                *cell
            })
        })
        .collect();
        path.reverse();
        Ok(path)
    }

    fn abort(&mut self) {
        if !self.is_complete() {
            self.state = SearchState::Failed(FailureReason::Cancelled);
        }
    }

    fn expansions(&self) -> usize {
        self.expansions
    }

    fn path_cost(&self) -> Option<i32> {
        if self.state != SearchState::Succeeded {
            return None;
        }
        self.nodes.get(&self.end).map(|node| node.cost)
    }

    fn visited_cells(&self) -> Vec<Point> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.closed)
            .map(|(cell, _)| *cell)
            .collect()
    }

    fn frontier_cells(&self) -> Vec<Point> {
        self.nodes
            .iter()
            .filter(|(_, node)| !node.closed)
            .map(|(cell, _)| *cell)
            .collect()
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellState, Movement};
    use crate::map_buffer::MapBuffer;
    use crate::solver::DijkstraSolver;
    use crate::STRAIGHT_COST;

    fn two_cell_grid() -> Grid {
        let mut buffer = MapBuffer::new(2, 1);
        buffer.paint(Point::new(0, 0), CellState::Start);
        buffer.paint(Point::new(1, 0), CellState::End);
        Grid::from_source(&buffer, Movement::FourDirectional, false).unwrap()
    }

    #[test]
    fn rejects_grid_without_markers() {
        let grid = Grid::unmarked(3, 3);
        assert!(matches!(
            Search::new(grid, DijkstraSolver),
            Err(SearchError::NoStartOrEnd)
        ));
    }

    #[test]
    fn step_requires_initialize() {
        let mut search = Search::new(two_cell_grid(), DijkstraSolver).unwrap();
        assert_eq!(search.state(), SearchState::Ready);
        assert_eq!(search.step(), Err(SearchError::InvalidState));
        search.initialize().unwrap();
        assert_eq!(search.initialize(), Err(SearchError::InvalidState));
    }

    #[test]
    fn adjacent_markers_resolve_in_two_expansions() {
        let mut search = Search::new(two_cell_grid(), DijkstraSolver).unwrap();
        search.initialize().unwrap();
        let first = search.step().unwrap();
        assert_eq!(
            first,
            StepEvent::Expanded {
                cell: Point::new(0, 0),
                improved: SmallVec::from_slice(&[Point::new(1, 0)]),
            }
        );
        let second = search.step().unwrap();
        assert_eq!(second, StepEvent::Reached { cell: Point::new(1, 0) });
        assert!(search.is_complete());
        assert_eq!(search.expansions(), 2);
        let path = search.extract_path().unwrap();
        assert_eq!(path, vec![Point::new(0, 0), Point::new(1, 0)]);
        assert_eq!(search.path_cost(), Some(STRAIGHT_COST));
    }

    #[test]
    fn extract_path_outside_success_is_invalid() {
        let mut search = Search::new(two_cell_grid(), DijkstraSolver).unwrap();
        assert_eq!(search.extract_path(), Err(SearchError::InvalidState));
        search.initialize().unwrap();
        assert_eq!(search.extract_path(), Err(SearchError::InvalidState));
    }

    #[test]
    fn walled_in_end_exhausts_frontier() {
        //  ____
        // |S.# |
        // |..#E|
        //  ____
        let mut buffer = MapBuffer::new(4, 2);
        buffer.paint(Point::new(0, 0), CellState::Start);
        buffer.paint(Point::new(2, 0), CellState::Wall);
        buffer.paint(Point::new(2, 1), CellState::Wall);
        buffer.paint(Point::new(3, 1), CellState::End);
        let grid = Grid::from_source(&buffer, Movement::FourDirectional, false).unwrap();
        let mut search = Search::new(grid, DijkstraSolver).unwrap();
        search.initialize().unwrap();
        loop {
            match search.step().unwrap() {
                StepEvent::Exhausted => break,
                StepEvent::Reached { .. } => panic!("walled-in end was reached"),
                StepEvent::Expanded { .. } => {}
            }
        }
        assert_eq!(search.state(), SearchState::Failed(FailureReason::Exhausted));
        assert_eq!(search.path_cost(), None);
        // The open component left of the wall is fully explored.
        assert_eq!(search.expansions(), 4);
    }

    #[test]
    fn abort_cancels_a_running_search() {
        let mut search = Search::new(two_cell_grid(), DijkstraSolver).unwrap();
        search.initialize().unwrap();
        search.abort();
        assert_eq!(search.state(), SearchState::Failed(FailureReason::Cancelled));
        assert_eq!(search.step(), Err(SearchError::InvalidState));
    }

    #[test]
    fn abort_does_not_overwrite_a_terminal_state() {
        let mut search = Search::new(two_cell_grid(), DijkstraSolver).unwrap();
        search.initialize().unwrap();
        while !search.is_complete() {
            search.step().unwrap();
        }
        assert_eq!(search.state(), SearchState::Succeeded);
        search.abort();
        assert_eq!(search.state(), SearchState::Succeeded);
    }
}
