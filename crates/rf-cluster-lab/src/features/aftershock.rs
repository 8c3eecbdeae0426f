//! Aftershock wild injection

use rand::Rng;

use crate::config::AftershockConfig;
use crate::grid::Grid;
use crate::sampler::pick_weighted;

/// Selection weight of every cell that may turn Wild.
///
/// Wilds and scatters are never eligible. Cells next to high-pay symbols
/// weigh the most, cells next to wilds a little more than the base.
pub fn aftershock_weights(grid: &Grid, config: &AftershockConfig) -> Vec<(usize, f64)> {
    (0..grid.len())
        .filter(|&i| {
            let symbol = grid.cells[i];
            !symbol.is_wild() && !symbol.is_scatter()
        })
        .map(|i| {
            let (highs, wilds) = grid.neighbors(i).fold((0u32, 0u32), |(h, w), n| {
                let symbol = grid.cells[n];
                (h + symbol.is_high() as u32, w + symbol.is_wild() as u32)
            });
            let weight = config.base_weight
                + config.high_adjacent_weight * f64::from(highs)
                + config.wild_adjacent_weight * f64::from(wilds);
            (i, weight)
        })
        .collect()
}

/// Choose the cell to convert, or `None` when no cell is eligible
pub fn pick_aftershock_cell<R: Rng + ?Sized>(
    grid: &Grid,
    config: &AftershockConfig,
    rng: &mut R,
) -> Option<usize> {
    let weights = aftershock_weights(grid, config);
    pick_weighted(&weights, rng)
}
