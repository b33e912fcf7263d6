pub mod cancellation;
pub mod evaluator;
pub mod julia;
pub mod mandelbrot;
mod orbit;
pub mod scalar;
pub mod tiled;

pub use cancellation::{CancelToken, CancellationChecker, NeverCancel};
pub use evaluator::{
    create_default_evaluator, create_evaluator, render_request, EscapeEvaluator, JuliaEvaluator,
    MandelbrotEvaluator,
};
pub use julia::{julia_escape_map, julia_escape_map_into};
pub use mandelbrot::{mandelbrot_escape_map, mandelbrot_escape_map_into};
pub use scalar::{escape_time, julia_escape_time, julia_radius_sq, MANDELBROT_RADIUS_SQ};
pub use tiled::{generate_tiles, render_tile, render_tiled, stitch, TileResult};

// Re-export core types for convenience
pub use escapetime_core::*;
