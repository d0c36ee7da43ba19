//! # grid_pathtrace
//!
//! A grid-based pathfinding engine for interactive sandboxes: paint a map
//! with walls and a start and end marker, pick a strategy
//! ([Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) or
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)), and watch the
//! search unfold one expansion at a time or get the final result in one
//! burst. The engine owns the algorithms and their disclosure protocol;
//! painting, windowing and rendering stay in the calling shell, which talks
//! to the engine through two narrow seams: a [GridSource] it reads the map
//! from and a [CellObserver] it reports cell changes to.
//!
//! Pre-computes [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! on each snapshot so an unsolvable map is diagnosed up front, while the
//! search itself still discloses its full flood for the observer to show.
//!
//! ```
//! use grid_pathtrace::{
//!     AlgorithmKind, CellState, Grid, MapBuffer, Movement, NoOpCellObserver,
//!     Point, RunConfig, RunController, RunStatus, UpdateMode,
//! };
//!
//! let mut surface = MapBuffer::new(3, 3);
//! surface.paint(Point::new(0, 0), CellState::Start);
//! surface.paint(Point::new(1, 1), CellState::Wall);
//! surface.paint(Point::new(2, 2), CellState::End);
//!
//! let config = RunConfig {
//!     algorithm: AlgorithmKind::Heuristic,
//!     update_mode: UpdateMode::Immediate,
//!     movement: Movement::FourDirectional,
//!     corner_cutting: false,
//! };
//! let grid = Grid::from_source(&surface, config.movement, config.corner_cutting).unwrap();
//! let mut controller = RunController::new(grid, &config).unwrap();
//! let status = controller.run(&mut NoOpCellObserver).unwrap();
//! assert_eq!(status, RunStatus::Succeeded);
//! assert_eq!(controller.path().unwrap().len(), 5);
//! ```

pub mod controller;
pub mod frontier;
pub mod grid;
pub mod map_buffer;
pub mod search;
pub mod solver;

pub use grid_util::point::Point;

pub use controller::{
    AlgorithmKind, CellObserver, CellRole, NoOpCellObserver, RunConfig, RunController, RunStatus,
    UpdateMode,
};
pub use frontier::Frontier;
pub use grid::{CellState, Grid, GridError, GridSource, Movement};
pub use map_buffer::MapBuffer;
pub use search::{
    Algorithm, FailureReason, Search, SearchError, SearchState, StepEvent,
};
pub use solver::{cost_as_steps, path_cost, AstarSolver, DijkstraSolver, Strategy};

/// Cost of a cardinal step. Costs are integers scaled so that a diagonal
/// step at [DIAGONAL_COST] approximates √2 cardinal steps.
pub const STRAIGHT_COST: i32 = 70;
/// Cost of a diagonal step (99/70 ≈ √2).
pub const DIAGONAL_COST: i32 = 99;
