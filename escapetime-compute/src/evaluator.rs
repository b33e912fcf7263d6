use crate::julia::{julia_escape_map, julia_escape_map_into};
use crate::mandelbrot::{mandelbrot_escape_map, mandelbrot_escape_map_into};
use crate::tiled::render_tiled;
use crate::NeverCancel;
use escapetime_core::{
    get_fractal_config, EscapeError, EscapeMap, FractalKind, RenderRequest, SampleGrid,
};
use num_complex::Complex64;

// ============================================================================
// Core Evaluator Trait
// ============================================================================

/// Turns a sample grid into an escape map.
///
/// Implementations are stateless between calls, so a single evaluator can be
/// shared across threads and called repeatedly with identical results.
pub trait EscapeEvaluator: dyn_clone::DynClone + Send + Sync {
    /// Fractal family, matches [`FractalConfig::id`](escapetime_core::FractalConfig::id)
    fn id(&self) -> &'static str;

    /// Iteration budget; never-escaping cells hold `max_iterations + 1`
    fn max_iterations(&self) -> u32;

    /// Evaluate every cell of `grid`
    fn evaluate(&self, grid: &SampleGrid) -> EscapeMap;

    /// Evaluate into a caller-owned map of the same shape
    fn evaluate_into(&self, grid: &SampleGrid, out: &mut EscapeMap) -> Result<(), EscapeError>;
}

dyn_clone::clone_trait_object!(EscapeEvaluator);

/// Mandelbrot recurrence: seed 0, parameter = grid point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MandelbrotEvaluator {
    max_iterations: u32,
}

impl MandelbrotEvaluator {
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl EscapeEvaluator for MandelbrotEvaluator {
    fn id(&self) -> &'static str {
        "mandelbrot"
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn evaluate(&self, grid: &SampleGrid) -> EscapeMap {
        mandelbrot_escape_map(grid, self.max_iterations)
    }

    fn evaluate_into(&self, grid: &SampleGrid, out: &mut EscapeMap) -> Result<(), EscapeError> {
        mandelbrot_escape_map_into(grid, self.max_iterations, out)
    }
}

/// Julia recurrence: seed = grid point, fixed parameter `c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JuliaEvaluator {
    c: Complex64,
    max_iterations: u32,
}

impl JuliaEvaluator {
    pub fn new(c: Complex64, max_iterations: u32) -> Self {
        Self { c, max_iterations }
    }

    pub fn parameter(&self) -> Complex64 {
        self.c
    }
}

impl EscapeEvaluator for JuliaEvaluator {
    fn id(&self) -> &'static str {
        "julia"
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    fn evaluate(&self, grid: &SampleGrid) -> EscapeMap {
        julia_escape_map(grid, self.c, self.max_iterations)
    }

    fn evaluate_into(&self, grid: &SampleGrid, out: &mut EscapeMap) -> Result<(), EscapeError> {
        julia_escape_map_into(grid, self.c, self.max_iterations, out)
    }
}

// ============================================================================
// Factory
// ============================================================================

/// Create the evaluator a request asks for.
pub fn create_evaluator(request: &RenderRequest) -> Result<Box<dyn EscapeEvaluator>, EscapeError> {
    let max_iterations = request.budget()?;
    Ok(match request.fractal {
        FractalKind::Mandelbrot => Box::new(MandelbrotEvaluator::new(max_iterations)),
        FractalKind::Julia { c } => Box::new(JuliaEvaluator::new(c, max_iterations)),
    })
}

/// Create an evaluator by fractal ID with the preset's default budget and parameter.
pub fn create_default_evaluator(id: &str) -> Option<Box<dyn EscapeEvaluator>> {
    let config = get_fractal_config(id)?;
    create_evaluator(&config.default_request()).ok()
}

/// Build the request's grid and evaluate it, tiled when the request asks for tiles.
pub fn render_request(request: &RenderRequest) -> Result<EscapeMap, EscapeError> {
    let evaluator = create_evaluator(request)?;
    let grid = request.grid()?;
    match request.tile_size {
        Some(tile_size) => render_tiled(evaluator.as_ref(), &grid, tile_size, &NeverCancel),
        None => Ok(evaluator.evaluate(&grid)),
    }
}
