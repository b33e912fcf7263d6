//! Masked orbit iteration over a whole grid.
//!
//! Every cell carries its current iterate and an active flag. Each round
//! advances only the active cells and retires the ones that crossed the escape
//! radius. A retired cell is never written again, so iterates past the radius
//! can't overflow into NaN and no work is spent on them.

use escapetime_core::SampleGrid;
use num_complex::Complex64;

/// Parameter of the recurrence `z = z² + c`.
#[derive(Clone, Copy, Debug)]
enum Parameter<'a> {
    /// One `c` per cell (Mandelbrot)
    PerCell(&'a [Complex64]),
    /// Shared `c` (Julia)
    Fixed(Complex64),
}

impl Parameter<'_> {
    #[inline]
    fn at(&self, index: usize) -> Complex64 {
        match self {
            Parameter::PerCell(values) => values[index],
            Parameter::Fixed(c) => *c,
        }
    }
}

/// Orbit state and active mask for one evaluator call.
pub(crate) struct OrbitBatch<'a> {
    z: Vec<Complex64>,
    active: Vec<bool>,
    remaining: usize,
    parameter: Parameter<'a>,
}

impl<'a> OrbitBatch<'a> {
    /// Seed 0 everywhere, parameter = grid point.
    pub(crate) fn mandelbrot(grid: &'a SampleGrid) -> Self {
        Self::with_seeds(
            vec![Complex64::new(0.0, 0.0); grid.len()],
            Parameter::PerCell(grid.points()),
        )
    }

    /// Seed = grid point, shared parameter `c`.
    pub(crate) fn julia(grid: &SampleGrid, c: Complex64) -> Self {
        Self::with_seeds(grid.points().to_vec(), Parameter::Fixed(c))
    }

    fn with_seeds(z: Vec<Complex64>, parameter: Parameter<'a>) -> Self {
        let n = z.len();
        Self {
            z,
            active: vec![true; n],
            remaining: n,
            parameter,
        }
    }

    /// Cells still iterating.
    pub(crate) fn remaining(&self) -> usize {
        self.remaining
    }

    /// Run rounds `1..=max_iterations`, writing the round at which each cell
    /// escapes into `escape`. Cells that never escape keep whatever `escape`
    /// held on entry (the cap value).
    ///
    /// Returns the number of rounds actually run.
    pub(crate) fn run(&mut self, max_iterations: u32, radius_sq: f64, escape: &mut [u32]) -> u32 {
        debug_assert_eq!(escape.len(), self.z.len());

        let mut rounds = 0;
        for i in 1..=max_iterations {
            if self.remaining == 0 {
                break;
            }
            self.step(i, radius_sq, escape);
            rounds = i;
        }
        rounds
    }

    /// One masked round: advance active cells, retire escaped ones.
    fn step(&mut self, iteration: u32, radius_sq: f64, escape: &mut [u32]) {
        let parameter = self.parameter;
        for (index, (z, active)) in self.z.iter_mut().zip(self.active.iter_mut()).enumerate() {
            if !*active {
                continue;
            }
            *z = *z * *z + parameter.at(index);
            if z.norm_sqr() > radius_sq {
                escape[index] = iteration;
                *active = false;
                self.remaining -= 1;
            }
        }
    }
}
