//! Toroidal grid geometry
//!
//! Cells are `IVec2` with `x` growing right and `y` growing down. Anything that
//! steps off one edge reappears on the opposite edge.

use glam::IVec2;
use rand::Rng;

use super::state::Direction;
use crate::consts::{GRID_HEIGHT, GRID_WIDTH};

/// A grid cell
pub type Cell = IVec2;

/// Fixed-size wrap-around playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        Self { width, height }
    }

    /// Center cell (where the snake head starts)
    pub fn center(&self) -> Cell {
        IVec2::new(self.width / 2, self.height / 2)
    }

    /// Whether `cell` lies inside `[0,width) x [0,height)`
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Normalize any coordinate onto the grid by modular wrap
    #[inline]
    pub fn wrap(&self, cell: Cell) -> Cell {
        IVec2::new(cell.x.rem_euclid(self.width), cell.y.rem_euclid(self.height))
    }

    /// The neighbouring cell in `direction`, wrapped
    #[inline]
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        debug_assert!(self.contains(cell), "cell {cell} outside grid");
        self.wrap(cell + direction.delta())
    }

    /// Iterate every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }

    /// Pick a uniformly random cell for which `occupied` is false.
    ///
    /// Rejection-samples random cells; returns `None` when the grid is full.
    pub fn random_free_cell<R, F>(&self, rng: &mut R, occupied: F) -> Option<Cell>
    where
        R: Rng + ?Sized,
        F: Fn(Cell) -> bool,
    {
        if self.cells().all(&occupied) {
            return None;
        }
        loop {
            let cell = IVec2::new(
                rng.random_range(0..self.width),
                rng.random_range(0..self.height),
            );
            if !occupied(cell) {
                return Some(cell);
            }
        }
    }
}
