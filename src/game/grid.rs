use serde::{Deserialize, Serialize};

use super::GameError;

/// Rows and columns of the canonical board
pub const DEFAULT_ROWS: usize = 5;
pub const DEFAULT_COLS: usize = 5;

/// Geometry of a row-major board. Positions are indexes `0..rows * cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyGrid);
        }
        Ok(Self { rows, cols })
    }

    /// Number of tiles on the board
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Split a position into (row, col)
    pub fn coordinates(&self, position: usize) -> Result<(usize, usize), GameError> {
        if position >= self.len() {
            return Err(GameError::InvalidPosition {
                position,
                tiles: self.len(),
            });
        }
        Ok((position / self.cols, position % self.cols))
    }

    /// Check if two positions touch horizontally, vertically or diagonally.
    /// Rows do not wrap, so the last column of one row never touches the
    /// first column of the next.
    pub fn are_neighbors(&self, a: usize, b: usize) -> Result<bool, GameError> {
        let (row_a, col_a) = self.coordinates(a)?;
        let (row_b, col_b) = self.coordinates(b)?;

        let row_diff = row_a.abs_diff(row_b);
        let col_diff = col_a.abs_diff(col_b);

        Ok(row_diff <= 1 && col_diff <= 1 && (row_diff + col_diff > 0))
    }

    /// All neighbors of a position, ascending
    pub fn neighbors(&self, position: usize) -> Result<Vec<usize>, GameError> {
        let (row, col) = self.coordinates(position)?;

        let rows = row.saturating_sub(1)..=(row + 1).min(self.rows - 1);
        let mut neighbors = Vec::with_capacity(8);
        for r in rows {
            for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                let candidate = r * self.cols + c;
                if candidate != position {
                    neighbors.push(candidate);
                }
            }
        }
        Ok(neighbors)
    }
}
