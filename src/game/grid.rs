use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::error::{GameError, GameResult};

/// A cell on the game grid, addressed as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// Dimensions of the playing field. Fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    rows: usize,
    cols: usize,
}

impl GridSpec {
    /// Both dimensions must be non-zero and addressable by a [`Position`],
    /// and the cell count must fit in a `usize`.
    pub fn new(rows: usize, cols: usize) -> GameResult<Self> {
        let max = i32::MAX as usize;
        let addressable = rows <= max && cols <= max && rows.checked_mul(cols).is_some();
        if rows == 0 || cols == 0 || !addressable {
            return Err(GameError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Largest grid that fits in `width` x `height` terminal cells when each
    /// grid cell is drawn `cell_width` characters wide.
    pub fn fit_area(width: u16, height: u16, cell_width: u16) -> GameResult<Self> {
        let cols = (width / cell_width.max(1)) as usize;
        Self::new(height as usize, cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells on the grid
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows as i32)
            .flat_map(move |row| (0..self.cols as i32).map(move |col| Position::new(row, col)))
    }
}
