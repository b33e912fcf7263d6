//! Cross-evaluator properties: scalar/grid equivalence, budget monotonicity,
//! idempotence and the Julia escape radius.

use escapetime_compute::{
    escape_time, julia_escape_map, julia_escape_time, mandelbrot_escape_map, render_tiled,
    EscapeEvaluator, JuliaEvaluator, MandelbrotEvaluator, NeverCancel, SampleGrid,
};
use num_complex::Complex64;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn mandelbrot_region() -> SampleGrid {
    SampleGrid::build(c(-2.25, 1.5), c(0.75, -1.5), 0.0625).unwrap()
}

fn julia_region() -> SampleGrid {
    SampleGrid::build(c(-1.75, 1.25), c(1.75, -1.25), 0.0625).unwrap()
}

#[test]
fn points_outside_radius_escape_at_zero_for_any_budget() {
    let grid = mandelbrot_region();
    for &point in grid.points().iter().filter(|p| p.norm_sqr() > 4.0) {
        for budget in [0, 1, 7, 200] {
            assert_eq!(escape_time(point, budget), Some(0), "{point}");
        }
    }
}

#[test]
fn origin_never_escapes() {
    for budget in [0, 1, 64, 4096] {
        assert_eq!(escape_time(c(0.0, 0.0), budget), None);
    }
}

#[test]
fn mandelbrot_grid_agrees_with_scalar_reference() {
    init_logging();
    let grid = mandelbrot_region();
    for budget in [0, 1, 2, 17, 80] {
        let map = mandelbrot_escape_map(&grid, budget);
        assert_eq!(map.shape(), grid.shape());
        for (index, (&point, &cell)) in grid.points().iter().zip(map.values()).enumerate() {
            match escape_time(point, budget) {
                Some(i) => assert_eq!(cell - 1, i, "cell {index} ({point}), budget {budget}"),
                None => assert_eq!(cell, budget + 1, "cell {index} ({point}), budget {budget}"),
            }
        }
    }
}

#[test]
fn julia_grid_agrees_with_scalar_reference() {
    init_logging();
    let grid = julia_region();
    for parameter in [c(-0.8, 0.156), c(0.285, 0.01), c(-0.4, 0.6), c(2.5, 0.0)] {
        let map = julia_escape_map(&grid, parameter, 60);
        for (&seed, &cell) in grid.points().iter().zip(map.values()) {
            match julia_escape_time(seed, parameter, 60) {
                Some(i) => assert_eq!(cell, i + 1, "seed {seed}, c {parameter}"),
                None => assert_eq!(cell, 61, "seed {seed}, c {parameter}"),
            }
        }
    }
}

#[test]
fn escape_time_is_budget_invariant_once_found() {
    let grid = mandelbrot_region();
    let small = mandelbrot_escape_map(&grid, 20);
    let large = mandelbrot_escape_map(&grid, 120);
    let small_cap = small.cap();

    for (&before, &after) in small.values().iter().zip(large.values()) {
        if before < small_cap {
            assert_eq!(after, before);
        } else {
            assert!(after >= small_cap, "{after} dropped below old cap {small_cap}");
        }
    }
    assert!(large.escaped_count() >= small.escaped_count());
}

#[test]
fn julia_escape_time_is_budget_invariant_once_found() {
    let grid = julia_region();
    let parameter = c(-0.8, 0.156);
    let small = julia_escape_map(&grid, parameter, 15);
    let large = julia_escape_map(&grid, parameter, 90);

    for (&before, &after) in small.values().iter().zip(large.values()) {
        if before < small.cap() {
            assert_eq!(after, before);
        } else {
            assert!(after >= small.cap());
        }
    }
}

#[test]
fn julia_wide_parameter_uses_its_own_magnitude_as_radius() {
    // |c| = 3. Seeds whose first iterate lands between 2 and 3 must not be
    // reported at iteration 1.
    let parameter = c(-3.0, 0.0);
    let grid = SampleGrid::from_rows(vec![vec![c(0.5, 0.0), c(-0.7, 0.0), c(0.6, 0.2)]]).unwrap();
    let map = julia_escape_map(&grid, parameter, 1);
    for (&seed, &cell) in grid.points().iter().zip(map.values()) {
        let first = seed * seed + parameter;
        assert!(first.norm() > 2.0 && first.norm() <= 3.0, "{first}");
        assert_eq!(cell, 2, "seed {seed} reported escaped at |z| = {}", first.norm());
    }
}

#[test]
fn evaluators_are_idempotent() {
    let grid = mandelbrot_region();
    let mandelbrot = MandelbrotEvaluator::new(64);
    assert_eq!(mandelbrot.evaluate(&grid), mandelbrot.evaluate(&grid));

    let grid = julia_region();
    let julia = JuliaEvaluator::new(c(0.285, 0.01), 64);
    assert_eq!(julia.evaluate(&grid), julia.evaluate(&grid));
}

#[test]
fn minus_two_single_cell_is_capped() {
    let grid = SampleGrid::from_rows(vec![vec![c(-2.0, 0.0)]]).unwrap();
    assert_eq!(mandelbrot_escape_map(&grid, 5).to_rows(), vec![vec![6]]);
    assert_eq!(escape_time(c(-2.0, 0.0), 5), None);
}

#[test]
fn greyscale_of_capped_cells_is_zero() {
    let grid = mandelbrot_region();
    let map = mandelbrot_escape_map(&grid, 30);
    let grey = map.greyscale();
    for (&cell, &g) in map.values().iter().zip(&grey) {
        assert!((0.0..1.0).contains(&g));
        if cell == map.cap() {
            assert_eq!(g, 0.0);
        } else {
            assert!(g > 0.0);
        }
    }
}

#[test]
fn tiled_render_is_indistinguishable_from_single_pass() {
    init_logging();
    let grid = julia_region();
    let evaluator = JuliaEvaluator::new(c(-0.4, 0.6), 70);
    let expected = evaluator.evaluate(&grid);
    let tiled = render_tiled(&evaluator, &grid, 9, &NeverCancel).unwrap();
    assert_eq!(tiled, expected);
}
