use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::direction::Direction;

/// Invalid grid dimensions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    Empty { rows: usize, cols: usize },
    #[error("grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },
}

/// Largest supported side length; keeps coordinate arithmetic inside `i32`
pub const MAX_SIDE: usize = 4096;

/// A cell on the board, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub row: i32,
    pub col: i32,
}

impl Segment {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// One step in `direction`, wrapping across the grid edges
    pub fn stepped(&self, direction: Direction, grid: Grid) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: fold(i64::from(self.row) + i64::from(d_row), grid.rows()),
            col: fold(i64::from(self.col) + i64::from(d_col), grid.cols()),
        }
    }

    /// Fold any coordinate back into `[1, rows] x [1, cols]`
    pub fn wrapped_into(&self, grid: Grid) -> Self {
        Self {
            row: fold(i64::from(self.row), grid.rows()),
            col: fold(i64::from(self.col), grid.cols()),
        }
    }
}

/// 1-based modulo; the result fits `i32` because `side <= MAX_SIDE`
fn fold(coord: i64, side: usize) -> i32 {
    ((coord - 1).rem_euclid(side as i64) + 1) as i32
}

/// Board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: usize,
    cols: usize,
}

#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Grid::new(raw.rows, raw.cols)
    }
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        if rows > MAX_SIDE || cols > MAX_SIDE {
            return Err(GridError::TooLarge { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn square(side: usize) -> Result<Self, GridError> {
        Self::new(side, side)
    }

    /// Pick a square grid that fits a viewport.
    ///
    /// The side is `min(width, height) / cell_size` clamped to
    /// `[min_cells, max_cells]`; `cell_size` of 0 is treated as 1.
    pub fn fit_viewport(
        width: usize,
        height: usize,
        min_cells: usize,
        max_cells: usize,
        cell_size: usize,
    ) -> Result<Self, GridError> {
        let fitted = width.min(height) / cell_size.max(1);
        let side = fitted.min(max_cells).max(min_cells);
        Self::square(side)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, segment: Segment) -> bool {
        segment.row >= 1
            && segment.row <= self.rows as i32
            && segment.col >= 1
            && segment.col <= self.cols as i32
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Segment> + '_ {
        let cols = self.cols as i32;
        (1..=self.rows as i32).flat_map(move |row| (1..=cols).map(move |col| Segment::new(row, col)))
    }

    /// Start cell used by a fresh game: the middle of the board
    pub fn center(&self) -> Segment {
        Segment::new(
            ((self.rows / 2).max(1)) as i32,
            ((self.cols / 2).max(1)) as i32,
        )
    }
}
