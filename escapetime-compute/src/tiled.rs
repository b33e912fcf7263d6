//! Tile-parallel evaluation.
//!
//! No cell depends on any other, so the grid can be cut into rectangles and
//! each one evaluated on its own rayon worker with its own orbit state. Tiles
//! are stitched back together only after all of them finished; a cancelled
//! render returns an error and no map.

use crate::{CancellationChecker, EscapeEvaluator};
use escapetime_core::{EscapeError, EscapeMap, GridRect, SampleGrid};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Escape map for one tile, positioned inside the full grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileResult {
    pub tile: GridRect,
    pub map: EscapeMap,
}

/// Generate tiles covering a `rows x cols` grid in row-major order.
///
/// Edge tiles are truncated to fit.
pub fn generate_tiles(rows: usize, cols: usize, tile_size: usize) -> Vec<GridRect> {
    if tile_size == 0 {
        return Vec::new();
    }
    (0..rows)
        .step_by(tile_size)
        .flat_map(|row| {
            (0..cols).step_by(tile_size).map(move |col| {
                GridRect::new(
                    row,
                    col,
                    tile_size.min(rows - row),
                    tile_size.min(cols - col),
                )
            })
        })
        .collect()
}

/// Evaluate one tile of `grid`.
pub fn render_tile(
    evaluator: &dyn EscapeEvaluator,
    grid: &SampleGrid,
    tile: GridRect,
) -> Result<TileResult, EscapeError> {
    let sub = grid.subgrid(&tile)?;
    let map = evaluator.evaluate(&sub);
    log::trace!(
        "tile {:?}: {} of {} escaped",
        tile,
        map.escaped_count(),
        tile.area()
    );
    Ok(TileResult { tile, map })
}

/// Evaluate `grid` in parallel tiles of at most `tile_size x tile_size` cells.
///
/// The result is identical to `evaluator.evaluate(grid)`. `cancel` is polled
/// before each tile and once more before stitching.
pub fn render_tiled<C: CancellationChecker>(
    evaluator: &dyn EscapeEvaluator,
    grid: &SampleGrid,
    tile_size: usize,
    cancel: &C,
) -> Result<EscapeMap, EscapeError> {
    if tile_size == 0 {
        return Err(EscapeError::InvalidArgument(
            "tile_size must be at least 1".to_string(),
        ));
    }
    let (rows, cols) = grid.shape();
    let tiles = generate_tiles(rows, cols, tile_size);
    log::debug!(
        "{}: rendering {:?} grid as {} tiles of {}",
        evaluator.id(),
        grid.shape(),
        tiles.len(),
        tile_size
    );

    let results = tiles
        .into_par_iter()
        .map(|tile| {
            if cancel.is_cancelled() {
                return Err(EscapeError::Cancelled);
            }
            render_tile(evaluator, grid, tile)
        })
        .collect::<Result<Vec<_>, _>>();

    let results = match results {
        Ok(results) if !cancel.is_cancelled() => results,
        Ok(_) | Err(EscapeError::Cancelled) => {
            log::warn!("{}: render of {:?} grid cancelled", evaluator.id(), grid.shape());
            return Err(EscapeError::Cancelled);
        }
        Err(e) => return Err(e),
    };

    stitch(rows, cols, evaluator.max_iterations(), &results)
}

/// Assemble tile results into one map.
pub fn stitch(
    rows: usize,
    cols: usize,
    max_iterations: u32,
    tiles: &[TileResult],
) -> Result<EscapeMap, EscapeError> {
    let mut out = EscapeMap::capped(rows, cols, max_iterations);
    for result in tiles {
        out.paste(&result.tile, &result.map)?;
    }
    Ok(out)
}
