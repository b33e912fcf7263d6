use crate::orbit::OrbitBatch;
use crate::scalar::MANDELBROT_RADIUS_SQ;
use escapetime_core::{EscapeError, EscapeMap, SampleGrid};

/// Escape times for every grid point under the Mandelbrot recurrence.
///
/// `z₀ = 0, zₙ = zₙ₋₁² + c` with `c` the grid point. A cell holds the 1-based
/// iteration at which `|z| > 2` first held, or `max_iterations + 1` if it never
/// did.
///
/// `max_iterations` must be below `u32::MAX`, otherwise the cap value would
/// collide with the last real iteration.
pub fn mandelbrot_escape_map(grid: &SampleGrid, max_iterations: u32) -> EscapeMap {
    let (rows, cols) = grid.shape();
    let mut out = EscapeMap::capped(rows, cols, max_iterations);
    fill(grid, max_iterations, &mut out);
    out
}

/// Like [`mandelbrot_escape_map`] but writes into a caller-owned map.
///
/// The map is reset to the cap value for `max_iterations` first; its shape must
/// match the grid.
pub fn mandelbrot_escape_map_into(
    grid: &SampleGrid,
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
    fill(grid, max_iterations, out);
    Ok(())
}

fn fill(grid: &SampleGrid, max_iterations: u32, out: &mut EscapeMap) {
    debug_assert!(max_iterations < u32::MAX, "max_iterations leaves no room for the cap");
    log::debug!(
        "mandelbrot: {:?} grid, max_iterations={}",
        grid.shape(),
        max_iterations
    );
    let mut batch = OrbitBatch::mandelbrot(grid);
    let rounds = batch.run(max_iterations, MANDELBROT_RADIUS_SQ, out.values_mut());
    log::debug!(
        "mandelbrot: {} of {} points escaped after {} rounds",
        grid.len() - batch.remaining(),
        grid.len(),
        rounds
    );
}
