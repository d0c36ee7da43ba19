use grid_util::grid::{Grid as GridStorage, SimpleGrid};
use grid_util::point::Point;

use crate::grid::{CellState, GridSource};

/// A mutable painting surface: the concrete [GridSource] a shell draws on
/// before handing the engine a snapshot.
///
/// Owns the marker-uniqueness invariant: painting a new start or end clears
/// the previous marker of that kind, so at most one of each ever exists.
/// Out-of-bounds paints are ignored, matching how a mouse-driven surface
/// drops strokes outside the canvas.
#[derive(Clone, Debug)]
pub struct MapBuffer {
    cells: SimpleGrid<u8>,
}

impl MapBuffer {
    /// An all-empty surface of the given size.
    pub fn new(width: usize, height: usize) -> MapBuffer {
        MapBuffer {
            cells: SimpleGrid::new(width, height, CellState::Empty as u8),
        }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && self.cells.index_in_bounds(p.x as usize, p.y as usize)
    }

    /// Paints one cell. Ignored when `p` is out of bounds. Painting a start
    /// or end clears the previous marker of that kind first.
    pub fn paint(&mut self, p: Point, state: CellState) {
        if !self.in_bounds(p) {
            return;
        }
        match state {
            CellState::Start | CellState::End => {
                if let Some(previous) = self.find_state(state) {
                    self.cells.set_point(previous, CellState::Empty as u8);
                }
            }
            _ => {}
        }
        self.cells.set_point(p, state as u8);
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        for x in 0..self.width() {
            for y in 0..self.height() {
                self.cells.set(x, y, CellState::Empty as u8);
            }
        }
    }
}

impl GridSource for MapBuffer {
    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn state_at(&self, p: Point) -> CellState {
        CellState::from_code(self.cells.get_point(p))
    }
}
