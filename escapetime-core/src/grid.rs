use crate::{EscapeError, GridRect};
use num_complex::Complex64;

/// Largest number of sample points a single grid may hold (4 GiB of points).
pub const MAX_GRID_CELLS: usize = 1 << 28;

/// Rectangular lattice of complex sample points.
///
/// Stored row-major:
/// - row index follows the imaginary axis, top row has the largest imaginary part
/// - column index follows the real axis, ascending
///
/// Built once per render request and read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid {
    rows: usize,
    cols: usize,
    points: Vec<Complex64>,
}

impl SampleGrid {
    /// Build the lattice spanned by two corners.
    ///
    /// `top_left` carries the smaller real part and the larger imaginary part.
    /// Both axes are half-open: the `bottom_right` coordinates are never sampled.
    /// Inverted corners give an empty grid rather than an error. A step so fine
    /// that the grid would exceed [`MAX_GRID_CELLS`] is rejected before
    /// anything is allocated.
    pub fn build(
        top_left: Complex64,
        bottom_right: Complex64,
        step: f64,
    ) -> Result<Self, EscapeError> {
        check_step(step)?;
        for (name, corner) in [("top_left", top_left), ("bottom_right", bottom_right)] {
            if !corner.re.is_finite() || !corner.im.is_finite() {
                return Err(EscapeError::invalid(format!(
                    "{name} must be finite, got {corner}"
                )));
            }
        }

        let cols = axis_len(bottom_right.re - top_left.re, step)?;
        let rows = axis_len(top_left.im - bottom_right.im, step)?;
        match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(EscapeError::invalid(format!(
                    "{rows}x{cols} grid exceeds {MAX_GRID_CELLS} cells, step {step} is too fine"
                )));
            }
        }

        let real = real_axis(top_left.re, bottom_right.re, step)?;
        let imag = imaginary_axis(top_left.im, bottom_right.im, step)?;

        // Outer sum of the two axes
        let points = imag
            .iter()
            .flat_map(|&im| real.iter().map(move |&re| Complex64::new(re, im)))
            .collect();

        let grid = Self {
            rows: imag.len(),
            cols: real.len(),
            points,
        };
        log::debug!(
            "built {}x{} sample grid from {} to {} (step {})",
            grid.rows,
            grid.cols,
            top_left,
            bottom_right,
            step
        );
        Ok(grid)
    }

    /// Wrap caller-supplied rows of points. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> Result<Self, EscapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != cols) {
            return Err(EscapeError::ShapeMismatch {
                expected: (rows.len(), cols),
                actual: (rows.len(), bad.len()),
            });
        }
        // Zero-width rows keep their count, like an empty real axis in `build`
        Ok(Self {
            rows: rows.len(),
            cols,
            points: rows.into_iter().flatten().collect(),
        })
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Row-major view of every sample point.
    pub fn points(&self) -> &[Complex64] {
        &self.points
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        if row < self.rows && col < self.cols {
            Some(self.points[row * self.cols + col])
        } else {
            None
        }
    }

    /// Copy out the points inside `rect` as an independent grid.
    pub fn subgrid(&self, rect: &GridRect) -> Result<Self, EscapeError> {
        if !rect.fits_within(self.rows, self.cols) {
            return Err(EscapeError::invalid(format!(
                "{rect:?} exceeds grid of shape {:?}",
                self.shape()
            )));
        }
        let points = (rect.row..rect.row + rect.rows)
            .flat_map(|row| {
                let start = row * self.cols + rect.col;
                self.points[start..start + rect.cols].iter().copied()
            })
            .collect();
        Ok(Self {
            rows: rect.rows,
            cols: rect.cols,
            points,
        })
    }
}

/// Convenience wrapper around [`SampleGrid::build`].
pub fn build_grid(
    top_left: Complex64,
    bottom_right: Complex64,
    step: f64,
) -> Result<SampleGrid, EscapeError> {
    SampleGrid::build(top_left, bottom_right, step)
}

/// Ascending real coordinates `start, start + step, ...` strictly below `end`.
pub fn real_axis(start: f64, end: f64, step: f64) -> Result<Vec<f64>, EscapeError> {
    check_step(step)?;
    let len = axis_len(end - start, step)?;
    Ok((0..len).map(|k| start + k as f64 * step).collect())
}

/// Descending imaginary coordinates `start, start - step, ...` strictly above `end`.
pub fn imaginary_axis(start: f64, end: f64, step: f64) -> Result<Vec<f64>, EscapeError> {
    check_step(step)?;
    let len = axis_len(start - end, step)?;
    Ok((0..len).map(|k| start - k as f64 * step).collect())
}

fn check_step(step: f64) -> Result<(), EscapeError> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(EscapeError::invalid(format!(
            "step must be positive and finite, got {step}"
        )))
    }
}

/// ceil(span / step), zero for empty or inverted spans.
fn axis_len(span: f64, step: f64) -> Result<usize, EscapeError> {
    let len = (span / step).ceil();
    if len.is_nan() || len <= 0.0 {
        Ok(0)
    } else if len <= MAX_GRID_CELLS as f64 {
        Ok(len as usize)
    } else {
        Err(EscapeError::invalid(format!(
            "axis of {len} samples exceeds {MAX_GRID_CELLS}, step {step} is too fine"
        )))
    }
}
