// escapetime-core/src/escape_map.rs

use crate::{EscapeError, GridRect};
use serde::{Deserialize, Serialize};

/// Escape times for every cell of a sample grid.
///
/// Values are 1-based iteration indices. Cells that never escaped within the
/// budget hold the cap value `max_iterations + 1`, so a renderer never meets an
/// undefined cell. Every value lies in `1..=max_iterations + 1`.
///
/// `max_iterations` must stay below `u32::MAX` for the cap to be distinct
/// from a real escape at the last iteration; [`crate::validate_budget`]
/// enforces that for budgets coming from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEscapeMap")]
pub struct EscapeMap {
    rows: usize,
    cols: usize,
    /// Iteration budget the map was computed with (for normalization)
    max_iterations: u32,
    values: Vec<u32>,
}

#[derive(Deserialize)]
struct RawEscapeMap {
    rows: usize,
    cols: usize,
    max_iterations: u32,
    values: Vec<u32>,
}

impl TryFrom<RawEscapeMap> for EscapeMap {
    type Error = EscapeError;

    fn try_from(raw: RawEscapeMap) -> Result<Self, Self::Error> {
        if raw.rows.checked_mul(raw.cols) != Some(raw.values.len()) {
            return Err(EscapeError::ShapeMismatch {
                expected: (raw.rows, raw.cols),
                actual: (1, raw.values.len()),
            });
        }
        let cap = cap_for(raw.max_iterations);
        if let Some(bad) = raw.values.iter().find(|&&v| v == 0 || v > cap) {
            return Err(EscapeError::invalid(format!(
                "escape time {bad} outside 1..={cap}"
            )));
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            max_iterations: raw.max_iterations,
            values: raw.values,
        })
    }
}

impl EscapeMap {
    /// Map of the given shape with every cell at the cap value.
    pub fn capped(rows: usize, cols: usize, max_iterations: u32) -> Self {
        Self {
            rows,
            cols,
            max_iterations,
            values: vec![cap_for(max_iterations); rows * cols],
        }
    }

    /// Wrap precomputed row-major values.
    pub fn from_values(
        rows: usize,
        cols: usize,
        max_iterations: u32,
        values: Vec<u32>,
    ) -> Result<Self, EscapeError> {
        RawEscapeMap {
            rows,
            cols,
            max_iterations,
            values,
        }
        .try_into()
    }

    /// Refill with the cap value for a new budget, keeping the allocation.
    pub fn reset(&mut self, max_iterations: u32) {
        self.max_iterations = max_iterations;
        self.values.fill(cap_for(max_iterations));
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Value stored for cells that never escaped.
    pub fn cap(&self) -> u32 {
        cap_for(self.max_iterations)
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [u32] {
        &mut self.values
    }

    pub fn into_values(self) -> Vec<u32> {
        self.values
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn is_capped(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(self.cap())
    }

    /// Cells that escaped within the budget.
    pub fn escaped_count(&self) -> usize {
        let cap = self.cap();
        self.values.iter().filter(|&&v| v != cap).count()
    }

    /// Values as nested rows, mostly handy for assertions and debugging.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        if self.cols == 0 {
            return Vec::new();
        }
        self.values.chunks(self.cols).map(<[u32]>::to_vec).collect()
    }

    /// Copy `tile` into this map at `rect`.
    pub fn paste(&mut self, rect: &GridRect, tile: &EscapeMap) -> Result<(), EscapeError> {
        if tile.shape() != (rect.rows, rect.cols) {
            return Err(EscapeError::ShapeMismatch {
                expected: (rect.rows, rect.cols),
                actual: tile.shape(),
            });
        }
        if !rect.fits_within(self.rows, self.cols) {
            return Err(EscapeError::invalid(format!(
                "{rect:?} exceeds map of shape {:?}",
                self.shape()
            )));
        }
        if tile.max_iterations != self.max_iterations {
            return Err(EscapeError::invalid(format!(
                "tile budget {} differs from map budget {}",
                tile.max_iterations, self.max_iterations
            )));
        }
        if rect.cols == 0 {
            return Ok(());
        }
        for (offset, src) in tile.values.chunks(rect.cols).enumerate() {
            let start = (rect.row + offset) * self.cols + rect.col;
            self.values[start..start + rect.cols].copy_from_slice(src);
        }
        Ok(())
    }

    /// Normalized intensity per cell: `(max - t + 1) / (max + 1)`.
    ///
    /// Immediate escapes land near 1, capped cells are exactly 0.
    pub fn greyscale(&self) -> Vec<f64> {
        let max = self.max_iterations as f64;
        self.values
            .iter()
            .map(|&t| (max - t as f64 + 1.0) / (max + 1.0))
            .collect()
    }

    /// [`greyscale`](Self::greyscale) scaled to 8-bit luma.
    pub fn to_luma8(&self) -> Vec<u8> {
        self.greyscale()
            .into_iter()
            .map(|g| (g.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

fn cap_for(max_iterations: u32) -> u32 {
    max_iterations.saturating_add(1)
}
