use serde::{Deserialize, Serialize};

/// Rectangle of cells inside a sample grid, in (row, col) index space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl GridRect {
    /// Create new grid rectangle
    pub fn new(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if a cell is inside the rectangle
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row - self.row < self.rows
            && col >= self.col
            && col - self.col < self.cols
    }

    /// Whether the rectangle lies inside a `rows x cols` grid.
    ///
    /// Far-out coordinates from a deserialized tile are rejected instead of
    /// overflowing.
    pub fn fits_within(&self, rows: usize, cols: usize) -> bool {
        let row_end = self.row.checked_add(self.rows);
        let col_end = self.col.checked_add(self.cols);
        matches!((row_end, col_end), (Some(r), Some(c)) if r <= rows && c <= cols)
    }
}
