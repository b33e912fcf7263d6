//! Single-point reference evaluators.
//!
//! These check the current iterate *before* advancing it and count from 0,
//! returning `None` when the point never escapes. The grid evaluators count
//! from 1 after advancing, so for every cell `grid == scalar + 1` whenever the
//! scalar result is `Some`, and the grid holds its cap value otherwise.

use num_complex::Complex64;

/// Escape radius squared for the Mandelbrot recurrence (|z| > 2).
pub const MANDELBROT_RADIUS_SQ: f64 = 4.0;

/// Escape radius squared for a Julia parameter: `max(|c|, 2)²`.
#[inline]
pub fn julia_radius_sq(c: Complex64) -> f64 {
    c.norm_sqr().max(MANDELBROT_RADIUS_SQ)
}

/// Mandelbrot escape check for one point.
///
/// Iterates `z₀ = c, zₙ₊₁ = zₙ² + c` and returns the first `i` in
/// `0..=max_iterations` with `|zᵢ| > 2`.
pub fn escape_time(c: Complex64, max_iterations: u32) -> Option<u32> {
    let mut z = c;
    for i in 0..=max_iterations {
        if z.norm_sqr() > MANDELBROT_RADIUS_SQ {
            return Some(i);
        }
        z = z * z + c;
    }
    None
}

/// Julia escape check for one seed under fixed parameter `c`.
///
/// The first iterate checked is `seed² + c`, which is what the grid evaluator
/// sees at its iteration 1.
pub fn julia_escape_time(seed: Complex64, c: Complex64, max_iterations: u32) -> Option<u32> {
    let radius_sq = julia_radius_sq(c);
    let mut z = seed * seed + c;
    for i in 0..=max_iterations {
        if z.norm_sqr() > radius_sq {
            return Some(i);
        }
        z = z * z + c;
    }
    None
}
