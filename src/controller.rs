use grid_util::point::Point;
use log::info;

use crate::grid::{CellState, Grid, Movement};
use crate::search::{Algorithm, FailureReason, Search, SearchError, SearchState, StepEvent};
use crate::solver::{AstarSolver, DijkstraSolver};

/// Which search strategy a run uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmKind {
    /// Dijkstra: expand by accumulated distance alone.
    UniformCost,
    /// A*: expand by accumulated distance plus an admissible estimate.
    Heuristic,
}

/// When the observer hears about cell changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    /// Notify after every expansion, returning control to the caller's loop
    /// between steps so it can repaint.
    Live,
    /// Run to completion silently, then publish the full final state once.
    Immediate,
}

/// Everything a shell configures about a run.
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    pub algorithm: AlgorithmKind,
    pub update_mode: UpdateMode,
    pub movement: Movement,
    /// Whether a diagonal move may slip between two orthogonally adjacent
    /// walls. Only meaningful with [Movement::EightDirectional].
    pub corner_cutting: bool,
}

impl Default for RunConfig {
    fn default() -> RunConfig {
        RunConfig {
            algorithm: AlgorithmKind::Heuristic,
            update_mode: UpdateMode::Live,
            movement: Movement::FourDirectional,
            corner_cutting: false,
        }
    }
}

/// How a cell should be presented. The shell maps roles to colors; the
/// engine never renders anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellRole {
    Unvisited,
    Frontier,
    Visited,
    Path,
}

/// Receives state-change notifications as a run progresses. All methods
/// default to no-ops so observers implement only what they present.
pub trait CellObserver {
    fn cell_changed(&mut self, _cell: Point, _role: CellRole) {}
    /// The ordered start-to-end path, emitted exactly once on success.
    fn path_found(&mut self, _path: &[Point], _cost: i32) {}
    /// Emitted exactly once when the search ends without a path.
    fn search_failed(&mut self) {}
}

/// Observer that ignores everything.
pub struct NoOpCellObserver;
impl CellObserver for NoOpCellObserver {}

/// Where a run currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    InProgress,
    Succeeded,
    Failed(FailureReason),
}

/// Drives an [Algorithm] to completion and feeds a [CellObserver].
///
/// The controller never blocks: in [UpdateMode::Live] each [tick](Self::tick)
/// performs one expansion and returns, so a single-threaded event loop can
/// interleave stepping with input handling and repaints. In
/// [UpdateMode::Immediate] the first tick finishes the whole run and
/// publishes once. The terminal outcome is reported to the observer exactly
/// once either way.
pub struct RunController {
    algorithm: Box<dyn Algorithm>,
    update_mode: UpdateMode,
    outcome_reported: bool,
}

impl RunController {
    /// Builds the configured strategy against the grid snapshot and seeds
    /// it. The grid moves into the controller; per-run state never outlives
    /// the controller that owns it.
    pub fn new(grid: Grid, config: &RunConfig) -> Result<RunController, SearchError> {
        let mut algorithm: Box<dyn Algorithm> = match config.algorithm {
            AlgorithmKind::UniformCost => Box::new(Search::new(grid, DijkstraSolver)?),
            AlgorithmKind::Heuristic => Box::new(Search::new(grid, AstarSolver::new())?),
        };
        algorithm.initialize()?;
        Ok(RunController {
            algorithm,
            update_mode: config.update_mode,
            outcome_reported: false,
        })
    }

    /// Advances the run. One expansion per call in live mode; the whole run
    /// on the first call in immediate mode. Calling again after completion
    /// reports the status without re-notifying the observer.
    pub fn tick(&mut self, observer: &mut dyn CellObserver) -> Result<RunStatus, SearchError> {
        if self.algorithm.is_complete() {
            return Ok(self.status());
        }
        match self.update_mode {
            UpdateMode::Live => {
                let event = self.algorithm.step()?;
                self.publish_step(&event, observer)?;
                Ok(self.status())
            }
            UpdateMode::Immediate => {
                while !self.algorithm.is_complete() {
                    self.algorithm.step()?;
                }
                self.publish_final_state(observer)?;
                Ok(self.status())
            }
        }
    }

    /// Runs to completion, ticking until the search reaches a terminal
    /// state. In live mode the observer still hears about every expansion.
    pub fn run(&mut self, observer: &mut dyn CellObserver) -> Result<RunStatus, SearchError> {
        loop {
            let status = self.tick(observer)?;
            if status != RunStatus::InProgress {
                info!(
                    "Run finished with {:?} after {} expansions",
                    status,
                    self.algorithm.expansions()
                );
                return Ok(status);
            }
        }
    }

    /// Cancels a run in progress and reports the failure to the observer
    /// (once). No effect on a completed run.
    pub fn abort(&mut self, observer: &mut dyn CellObserver) {
        if self.algorithm.is_complete() {
            return;
        }
        self.algorithm.abort();
        if !self.outcome_reported {
            self.outcome_reported = true;
            observer.search_failed();
        }
    }

    pub fn status(&self) -> RunStatus {
        match self.algorithm.state() {
            SearchState::Succeeded => RunStatus::Succeeded,
            SearchState::Failed(reason) => RunStatus::Failed(reason),
            _ => RunStatus::InProgress,
        }
    }

    /// Number of cells the underlying search finalized so far.
    pub fn expansions(&self) -> usize {
        self.algorithm.expansions()
    }

    /// The found path, once the run succeeded.
    pub fn path(&self) -> Result<Vec<Point>, SearchError> {
        self.algorithm.extract_path()
    }

    /// Accumulated cost of the found path, once the run succeeded.
    pub fn path_cost(&self) -> Option<i32> {
        self.algorithm.path_cost()
    }

    /// Announces every open cell as [CellRole::Unvisited]: the explicit
    /// reset sweep a shell calls before re-running on the same surface.
    /// Never called implicitly; starting a run does not clear overlays.
    pub fn publish_unvisited(&self, observer: &mut dyn CellObserver) {
        let grid = self.algorithm.grid();
        for x in 0..grid.width() as i32 {
            for y in 0..grid.height() as i32 {
                let p = Point::new(x, y);
                if grid.state_at(p) != CellState::Wall {
                    observer.cell_changed(p, CellRole::Unvisited);
                }
            }
        }
    }

    fn publish_step(
        &mut self,
        event: &StepEvent,
        observer: &mut dyn CellObserver,
    ) -> Result<(), SearchError> {
        match event {
            StepEvent::Expanded { cell, improved } => {
                observer.cell_changed(*cell, CellRole::Visited);
                for n in improved {
                    observer.cell_changed(*n, CellRole::Frontier);
                }
            }
            StepEvent::Reached { cell } => {
                observer.cell_changed(*cell, CellRole::Visited);
                self.report_outcome(observer)?;
            }
            StepEvent::Exhausted => {
                self.report_outcome(observer)?;
            }
        }
        Ok(())
    }

    fn publish_final_state(&mut self, observer: &mut dyn CellObserver) -> Result<(), SearchError> {
        for cell in self.algorithm.visited_cells() {
            observer.cell_changed(cell, CellRole::Visited);
        }
        for cell in self.algorithm.frontier_cells() {
            observer.cell_changed(cell, CellRole::Frontier);
        }
        self.report_outcome(observer)
    }

    fn report_outcome(&mut self, observer: &mut dyn CellObserver) -> Result<(), SearchError> {
        if self.outcome_reported {
            return Ok(());
        }
        self.outcome_reported = true;
        match self.algorithm.state() {
            SearchState::Succeeded => {
                let path = self.algorithm.extract_path()?;
                let cost = self.algorithm.path_cost().unwrap_or(0);
                for p in &path {
                    observer.cell_changed(*p, CellRole::Path);
                }
                observer.path_found(&path, cost);
            }
            SearchState::Failed(_) => observer.search_failed(),
            _ => {}
        }
        Ok(())
    }
}
