use crate::orbit::OrbitBatch;
use crate::scalar::julia_radius_sq;
use escapetime_core::{EscapeError, EscapeMap, SampleGrid};
use num_complex::Complex64;

/// Escape times for every grid point under the Julia recurrence for `c`.
///
/// Roles are swapped relative to the Mandelbrot evaluator: the grid point is
/// the seed `z₀`, the parameter `c` is fixed. The escape radius is
/// `max(|c|, 2)`; with radius 2 alone, parameters with `|c| > 2` would report
/// points escaping while their orbit can still come back.
///
/// `max_iterations` must be below `u32::MAX`, as for the Mandelbrot evaluator.
pub fn julia_escape_map(grid: &SampleGrid, c: Complex64, max_iterations: u32) -> EscapeMap {
    let (rows, cols) = grid.shape();
    let mut out = EscapeMap::capped(rows, cols, max_iterations);
    fill(grid, c, max_iterations, &mut out);
    out
}

/// Like [`julia_escape_map`] but writes into a caller-owned map.
///
/// Fails with [`EscapeError::ShapeMismatch`] if `out` doesn't have the grid's
/// shape. On success every cell is overwritten.
pub fn julia_escape_map_into(
    grid: &SampleGrid,
    c: Complex64,
    max_iterations: u32,
    out: &mut EscapeMap,
) -> Result<(), EscapeError> {
    if out.shape() != grid.shape() {
        return Err(EscapeError::ShapeMismatch {
            expected: grid.shape(),
            actual: out.shape(),
        });
    }
    out.reset(max_iterations);
    fill(grid, c, max_iterations, out);
    Ok(())
}

fn fill(grid: &SampleGrid, c: Complex64, max_iterations: u32, out: &mut EscapeMap) {
    debug_assert!(max_iterations < u32::MAX, "max_iterations leaves no room for the cap");
    let radius_sq = julia_radius_sq(c);
    log::debug!(
        "julia c={}: {:?} grid, max_iterations={}, radius={}",
        c,
        grid.shape(),
        max_iterations,
        radius_sq.sqrt()
    );
    let mut batch = OrbitBatch::julia(grid, c);
    let rounds = batch.run(max_iterations, radius_sq, out.values_mut());
    log::debug!(
        "julia c={}: {} of {} points escaped after {} rounds",
        c,
        grid.len() - batch.remaining(),
        grid.len(),
        rounds
    );
}
