//! Fractal presets and render requests.
//!
//! Presets describe the default region and budget for each fractal family.
//! A [`RenderRequest`] is the serializable description of one evaluation that
//! callers (CLI front ends, config files) hand to the compute layer.

use crate::{validate_budget, EscapeError, SampleGrid};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Configuration for a fractal family.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalConfig {
    /// Unique identifier (matches evaluator ID in compute layer)
    pub id: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Default top-left corner as (re, im)
    pub default_top_left: (f64, f64),
    /// Default bottom-right corner as (re, im)
    pub default_bottom_right: (f64, f64),
    /// Default lattice spacing
    pub default_step: f64,
    /// Default iteration budget
    pub default_max_iterations: u32,
    /// Fixed parameter for Julia sets, `None` for Mandelbrot
    pub default_parameter: Option<(f64, f64)>,
}

impl FractalConfig {
    /// Request covering this preset's default region.
    pub fn default_request(&self) -> RenderRequest {
        let fractal = match self.default_parameter {
            Some((re, im)) => FractalKind::Julia {
                c: Complex64::new(re, im),
            },
            None => FractalKind::Mandelbrot,
        };
        RenderRequest {
            fractal,
            top_left: Complex64::new(self.default_top_left.0, self.default_top_left.1),
            bottom_right: Complex64::new(self.default_bottom_right.0, self.default_bottom_right.1),
            step: self.default_step,
            max_iterations: i64::from(self.default_max_iterations),
            tile_size: None,
        }
    }
}

pub static MANDELBROT_CONFIG: FractalConfig = FractalConfig {
    id: "mandelbrot",
    display_name: "Mandelbrot Set",
    default_top_left: (-2.0, 1.25),
    default_bottom_right: (0.5, -1.25),
    default_step: 1.0 / 128.0,
    default_max_iterations: 100,
    default_parameter: None,
};

pub static JULIA_CONFIG: FractalConfig = FractalConfig {
    id: "julia",
    display_name: "Julia Set",
    default_top_left: (-1.5, 1.5),
    default_bottom_right: (1.5, -1.5),
    default_step: 1.0 / 128.0,
    default_max_iterations: 100,
    default_parameter: Some((-0.8, 0.156)),
};

/// Look up a fractal configuration by ID.
pub fn get_fractal_config(id: &str) -> Option<&'static FractalConfig> {
    match id {
        "mandelbrot" => Some(&MANDELBROT_CONFIG),
        "julia" => Some(&JULIA_CONFIG),
        _ => None,
    }
}

/// Which recurrence to evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FractalKind {
    /// Seed 0, parameter = grid point
    Mandelbrot,
    /// Seed = grid point, fixed parameter `c`
    Julia {
        #[serde(with = "complex_pair")]
        c: Complex64,
    },
}

impl FractalKind {
    pub fn id(&self) -> &'static str {
        match self {
            FractalKind::Mandelbrot => MANDELBROT_CONFIG.id,
            FractalKind::Julia { .. } => JULIA_CONFIG.id,
        }
    }
}

/// One evaluation: region, spacing, budget and recurrence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub fractal: FractalKind,
    #[serde(with = "complex_pair")]
    pub top_left: Complex64,
    #[serde(with = "complex_pair")]
    pub bottom_right: Complex64,
    pub step: f64,
    /// Signed so that a negative budget in a config file reaches
    /// [`RenderRequest::budget`] and is reported rather than rejected by the parser.
    pub max_iterations: i64,
    /// Split the grid into square tiles of this size for parallel evaluation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<usize>,
}

impl RenderRequest {
    pub fn from_json(json: &str) -> Result<Self, EscapeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EscapeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validated iteration budget.
    pub fn budget(&self) -> Result<u32, EscapeError> {
        validate_budget(self.max_iterations)
    }

    /// Build the sample grid this request covers.
    pub fn grid(&self) -> Result<SampleGrid, EscapeError> {
        SampleGrid::build(self.top_left, self.bottom_right, self.step)
    }
}

/// Complex numbers as `[re, im]` in config files.
mod complex_pair {
    use num_complex::Complex64;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Complex64, serializer: S) -> Result<S::Ok, S::Error> {
        [value.re, value.im].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Complex64, D::Error> {
        let [re, im] = <[f64; 2]>::deserialize(deserializer)?;
        Ok(Complex64::new(re, im))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_fractal_config_finds_both_families() {
        assert_eq!(
            get_fractal_config("mandelbrot").unwrap().display_name,
            "Mandelbrot Set"
        );
        assert_eq!(get_fractal_config("julia").unwrap().display_name, "Julia Set");
    }

    #[test]
    fn get_fractal_config_returns_none_for_unknown() {
        assert!(get_fractal_config("burning_ship").is_none());
    }

    #[test]
    fn default_requests_match_presets() {
        let request = MANDELBROT_CONFIG.default_request();
        assert_eq!(request.fractal, FractalKind::Mandelbrot);
        assert_eq!(request.budget().unwrap(), 100);

        let request = JULIA_CONFIG.default_request();
        assert_eq!(
            request.fractal,
            FractalKind::Julia {
                c: Complex64::new(-0.8, 0.156)
            }
        );
        assert_eq!(request.fractal.id(), "julia");
    }

    #[test]
    fn default_grid_has_expected_shape() {
        let grid = MANDELBROT_CONFIG.default_request().grid().unwrap();
        // 2.5 * 128 on both axes
        assert_eq!(grid.shape(), (320, 320));
    }

    #[test]
    fn request_parses_from_json() {
        let json = r#"{
            "fractal": {"type": "julia", "c": [0.285, 0.01]},
            "top_left": [-1.5, 1.0],
            "bottom_right": [1.5, -1.0],
            "step": 0.5,
            "max_iterations": 50,
            "tile_size": 16
        }"#;
        let request = RenderRequest::from_json(json).unwrap();
        assert_eq!(
            request.fractal,
            FractalKind::Julia {
                c: Complex64::new(0.285, 0.01)
            }
        );
        assert_eq!(request.top_left, Complex64::new(-1.5, 1.0));
        assert_eq!(request.tile_size, Some(16));
        assert_eq!(request.grid().unwrap().shape(), (4, 6));
    }

    #[test]
    fn request_json_roundtrip() {
        let request = MANDELBROT_CONFIG.default_request();
        let json = request.to_json().unwrap();
        assert!(!json.contains("tile_size"));
        assert_eq!(RenderRequest::from_json(&json).unwrap(), request);
    }

    #[test]
    fn negative_budget_surfaces_as_invalid_argument() {
        let mut request = MANDELBROT_CONFIG.default_request();
        request.max_iterations = -3;
        assert!(matches!(
            request.budget(),
            Err(EscapeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = RenderRequest::from_json("{\"fractal\": 3}").unwrap_err();
        assert!(matches!(err, EscapeError::Config(_)));
    }
}
