pub mod config;
pub mod error;
pub mod escape_map;
pub mod grid;
pub mod grid_rect;

pub use config::{
    get_fractal_config, FractalConfig, FractalKind, RenderRequest, JULIA_CONFIG,
    MANDELBROT_CONFIG,
};
pub use error::{validate_budget, EscapeError};
pub use escape_map::EscapeMap;
pub use grid::{build_grid, imaginary_axis, real_axis, SampleGrid, MAX_GRID_CELLS};
pub use grid_rect::GridRect;

/// Sample point type used throughout the workspace.
pub use num_complex::Complex64 as ComplexPoint;
pub use num_complex;
