use core::fmt;
use std::error::Error;

use grid_util::grid::{BoolGrid, Grid as GridStorage};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// State of a single map cell. At most one cell is [CellState::Start] and at
/// most one is [CellState::End]; the painting surface owns that invariant
/// (see [MapBuffer](crate::MapBuffer)), the engine only validates it on
/// snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CellState {
    Empty = 0,
    Wall = 1,
    Start = 2,
    End = 3,
}

impl CellState {
    pub(crate) fn from_code(code: u8) -> CellState {
        match code {
            1 => CellState::Wall,
            2 => CellState::Start,
            3 => CellState::End,
            _ => CellState::Empty,
        }
    }
}

/// Movement model: which cells count as neighbours of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Movement {
    /// Cardinal moves only (von Neumann neighbourhood).
    #[default]
    FourDirectional,
    /// Cardinal and diagonal moves (Moore neighbourhood).
    EightDirectional,
}

/// Errors produced when snapshotting a [GridSource] into a [Grid].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    MissingStart,
    MissingEnd,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::MissingStart => write!(f, "map has no start cell"),
            GridError::MissingEnd => write!(f, "map has no end cell"),
        }
    }
}

impl Error for GridError {}

/// Read-only snapshot access to a rectangular map: the interface a painting
/// shell exposes for the engine to read the initial map from.
pub trait GridSource {
    /// Map size as (width, height).
    fn dimensions(&self) -> (usize, usize);
    /// State of the cell at `p`. Only called for in-bounds positions.
    fn state_at(&self, p: Point) -> CellState;

    /// Position of the unique start cell, if any, found by scanning.
    fn start(&self) -> Option<Point> {
        self.find_state(CellState::Start)
    }
    /// Position of the unique end cell, if any, found by scanning.
    fn end(&self) -> Option<Point> {
        self.find_state(CellState::End)
    }

    #[doc(hidden)]
    fn find_state(&self, wanted: CellState) -> Option<Point> {
        let (w, h) = self.dimensions();
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                let p = Point::new(x, y);
                if self.state_at(p) == wanted {
                    return Some(p);
                }
            }
        }
        None
    }
}

/// The immutable map a search runs against: wall occupancy, the start and end
/// markers, the movement model and precomputed connected components.
///
/// A [Grid] is a snapshot: it is constructed once per run from a [GridSource]
/// and never changes while an algorithm holds it, so repainting the surface
/// mid-run cannot race the search.
#[derive(Clone, Debug)]
pub struct Grid {
    walls: BoolGrid,
    start: Option<Point>,
    end: Option<Point>,
    movement: Movement,
    corner_cutting: bool,
    components: UnionFind<usize>,
}

impl Grid {
    /// Snapshots `source` into an immutable grid. Fails if the source has no
    /// start or no end marker.
    ///
    /// `corner_cutting` only matters for [Movement::EightDirectional]: when
    /// [false], a diagonal move is blocked if either of the two cells it
    /// slips between is a wall.
    pub fn from_source<S: GridSource>(
        source: &S,
        movement: Movement,
        corner_cutting: bool,
    ) -> Result<Grid, GridError> {
        let start = source.start().ok_or(GridError::MissingStart)?;
        let end = source.end().ok_or(GridError::MissingEnd)?;
        let (w, h) = source.dimensions();
        let mut walls = BoolGrid::new(w, h, false);
        for x in 0..w {
            for y in 0..h {
                let state = source.state_at(Point::new(x as i32, y as i32));
                walls.set(x, y, state == CellState::Wall);
            }
        }
        let mut grid = Grid {
            walls,
            start: Some(start),
            end: Some(end),
            movement,
            corner_cutting,
            components: UnionFind::new(w * h),
        };
        grid.generate_components();
        Ok(grid)
    }

    /// Map size as (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.walls.width(), self.walls.height())
    }
    pub fn width(&self) -> usize {
        self.walls.width()
    }
    pub fn height(&self) -> usize {
        self.walls.height()
    }
    pub fn movement(&self) -> Movement {
        self.movement
    }

    /// The start marker. Present on every grid built by [Grid::from_source].
    pub fn start(&self) -> Option<Point> {
        self.start
    }
    /// The end marker. Present on every grid built by [Grid::from_source].
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// State of the cell at `p`, which must be in bounds.
    pub fn state_at(&self, p: Point) -> CellState {
        debug_assert!(self.in_bounds(p));
        if self.start == Some(p) {
            CellState::Start
        } else if self.end == Some(p) {
            CellState::End
        } else if self.walls.get_point(p) {
            CellState::Wall
        } else {
            CellState::Empty
        }
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && self.walls.index_in_bounds(p.x as usize, p.y as usize)
    }

    fn is_wall(&self, p: Point) -> bool {
        self.walls.get_point(p)
    }

    /// Whether a move from `from` to the adjacent cell `to` is allowed. `to`
    /// must be in bounds and open; a diagonal move additionally requires both
    /// cells it slips between to be open unless corner cutting is enabled.
    fn can_move_to(&self, from: Point, to: Point) -> bool {
        if !self.in_bounds(to) || self.is_wall(to) {
            return false;
        }
        let diagonal = from.x != to.x && from.y != to.y;
        if !diagonal || self.corner_cutting {
            return true;
        }
        !self.is_wall(Point::new(from.x, to.y)) && !self.is_wall(Point::new(to.x, from.y))
    }

    /// The in-bounds, non-wall neighbours of `p` under the configured
    /// movement model. This is the only place bounds clamping lives; callers
    /// never see an out-of-bounds position.
    pub fn neighbors(&self, p: Point) -> SmallVec<[Point; 8]> {
        self.neighborhood(p)
            .into_iter()
            .filter(|&n| self.can_move_to(p, n))
            .collect()
    }

    fn neighborhood(&self, p: Point) -> SmallVec<[Point; 8]> {
        let mut points: SmallVec<[Point; 8]> = SmallVec::new();
        points.push(Point::new(p.x, p.y - 1));
        points.push(Point::new(p.x - 1, p.y));
        points.push(Point::new(p.x + 1, p.y));
        points.push(Point::new(p.x, p.y + 1));
        if self.movement == Movement::EightDirectional {
            points.push(Point::new(p.x - 1, p.y - 1));
            points.push(Point::new(p.x + 1, p.y - 1));
            points.push(Point::new(p.x - 1, p.y + 1));
            points.push(Point::new(p.x + 1, p.y + 1));
        }
        points
    }

    /// Whether the end marker is on the same connected component as the
    /// start marker. A search on a grid where this is [false] will flood the
    /// whole component and end in failure.
    pub fn reachable(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => self
                .components
                .equiv(self.ix(start), self.ix(end)),
            _ => false,
        }
    }

    fn ix(&self, p: Point) -> usize {
        self.walls.get_ix(p.x as usize, p.y as usize)
    }

    /// Links up open neighbouring cells into a [UnionFind] structure, joining
    /// each cell with its forward neighbours so every pair is visited once.
    fn generate_components(&mut self) {
        info!("Generating connected components");
        let w = self.walls.width();
        let h = self.walls.height();
        self.components = UnionFind::new(w * h);
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                let point = Point::new(x, y);
                if self.is_wall(point) {
                    continue;
                }
                let parent_ix = self.ix(point);
                let mut forward: SmallVec<[Point; 4]> = SmallVec::new();
                forward.push(Point::new(point.x + 1, point.y));
                forward.push(Point::new(point.x, point.y + 1));
                if self.movement == Movement::EightDirectional {
                    forward.push(Point::new(point.x + 1, point.y - 1));
                    forward.push(Point::new(point.x + 1, point.y + 1));
                }
                let open: SmallVec<[Point; 4]> = forward
                    .into_iter()
                    .filter(|&n| self.can_move_to(point, n))
                    .collect();
                for n in open {
                    let ix = self.ix(n);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    /// Test-only constructor bypassing marker validation, used to exercise
    /// the defensive marker re-check in the algorithm layer.
    #[cfg(test)]
    pub(crate) fn unmarked(width: usize, height: usize) -> Grid {
        Grid {
            walls: BoolGrid::new(width, height, false),
            start: None,
            end: None,
            movement: Movement::FourDirectional,
            corner_cutting: false,
            components: UnionFind::new(width * height),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let c = match self.state_at(Point::new(x, y)) {
                    CellState::Empty => '.',
                    CellState::Wall => '#',
                    CellState::Start => 'S',
                    CellState::End => 'E',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_buffer::MapBuffer;

    fn painted(width: usize, height: usize, walls: &[(i32, i32)]) -> MapBuffer {
        let mut buffer = MapBuffer::new(width, height);
        for &(x, y) in walls {
            buffer.paint(Point::new(x, y), CellState::Wall);
        }
        buffer
    }

    #[test]
    fn missing_markers_are_construction_errors() {
        let mut buffer = MapBuffer::new(3, 3);
        assert!(matches!(
            Grid::from_source(&buffer, Movement::FourDirectional, false),
            Err(GridError::MissingStart)
        ));
        buffer.paint(Point::new(0, 0), CellState::Start);
        assert!(matches!(
            Grid::from_source(&buffer, Movement::FourDirectional, false),
            Err(GridError::MissingEnd)
        ));
        buffer.paint(Point::new(2, 2), CellState::End);
        assert!(Grid::from_source(&buffer, Movement::FourDirectional, false).is_ok());
    }

    #[test]
    fn neighbors_clamp_bounds_and_walls() {
        let mut buffer = painted(3, 3, &[(1, 0)]);
        buffer.paint(Point::new(0, 0), CellState::Start);
        buffer.paint(Point::new(2, 2), CellState::End);
        let grid = Grid::from_source(&buffer, Movement::FourDirectional, false).unwrap();
        let corner = grid.neighbors(Point::new(0, 0));
        // Only the southern neighbour is open: west/north are out of bounds
        // and the eastern cell is a wall.
        assert_eq!(corner.as_slice(), &[Point::new(0, 1)]);
        let center = grid.neighbors(Point::new(1, 1));
        assert_eq!(center.len(), 3);
        assert!(!center.contains(&Point::new(1, 0)));
    }

    #[test]
    fn corner_cutting_switch() {
        //  ___
        // |S#|
        // |#E|
        //  __
        let mut buffer = painted(2, 2, &[(1, 0), (0, 1)]);
        buffer.paint(Point::new(0, 0), CellState::Start);
        buffer.paint(Point::new(1, 1), CellState::End);
        let strict = Grid::from_source(&buffer, Movement::EightDirectional, false).unwrap();
        assert!(strict.neighbors(Point::new(0, 0)).is_empty());
        assert!(!strict.reachable());
        let cutting = Grid::from_source(&buffer, Movement::EightDirectional, true).unwrap();
        assert_eq!(cutting.neighbors(Point::new(0, 0)).as_slice(), &[Point::new(1, 1)]);
        assert!(cutting.reachable());
    }

    #[test]
    fn component_split_by_wall_column() {
        //  ___
        // |S#.|
        // |.#E|
        //  ___
        let mut buffer = painted(3, 2, &[(1, 0), (1, 1)]);
        buffer.paint(Point::new(0, 0), CellState::Start);
        buffer.paint(Point::new(2, 1), CellState::End);
        let grid = Grid::from_source(&buffer, Movement::FourDirectional, false).unwrap();
        assert!(!grid.reachable());
        let diag = Grid::from_source(&buffer, Movement::EightDirectional, false).unwrap();
        assert!(!diag.reachable());
    }

    #[test]
    fn display_renders_markers() {
        let mut buffer = painted(3, 1, &[(1, 0)]);
        buffer.paint(Point::new(0, 0), CellState::Start);
        buffer.paint(Point::new(2, 0), CellState::End);
        let grid = Grid::from_source(&buffer, Movement::FourDirectional, false).unwrap();
        assert_eq!(grid.to_string(), "S#E\n");
    }
}
