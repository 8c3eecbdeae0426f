//! Spin orchestrator
//!
//! Drives one spin from a fresh (or supplied) board to its terminal state:
//! find clusters, modify payouts, pay, tumble, watch scatters, repeat.

use rand::Rng;

use crate::cluster::{Cluster, explode_positions, find_clusters};
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::features::{
    ScatterInfusion, ScatterTracker, apply_enchanted_wild, apply_rtp_scale, pick_aftershock_cell,
};
use crate::grid::{Grid, generate_grid};
use crate::rng::spin_rng;
use crate::sampler::WeightTable;
use crate::spin::{SpinMode, SpinResult, SpinStep, SpinTermination};
use crate::symbols::SymbolId;
use crate::tumble::tumble;

// ═══════════════════════════════════════════════════════════════════════════
// SPIN ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════

/// Play one spin.
///
/// With `Some(seed)` the result is fully reproducible. `None` draws a fresh
/// seed from the thread RNG; the seed used is echoed in `SpinResult::seed`
/// so such a spin can still be replayed afterwards.
///
/// In base mode the ladder always starts at 0 and `ladder_index_in` is
/// ignored. In free-spins mode it carries over from the previous spin.
pub fn simulate_spin(
    config: &SimConfig,
    mode: SpinMode,
    fs_remaining_in: u32,
    ladder_index_in: u32,
    seed: Option<u64>,
) -> SimResult<SpinResult> {
    config.validate()?;
    let (mut rng, seed) = spin_rng(seed);
    let weights = config.spin_weights(mode);
    let initial = generate_grid(config.cols, config.rows, &weights, &mut rng);
    Ok(resolve_spin(
        config,
        mode,
        fs_remaining_in,
        ladder_index_in,
        initial,
        &weights,
        &mut rng,
        seed,
    ))
}

/// Play one spin from a caller-supplied initial board.
///
/// Refills still come from the seeded generator, so the same grid and seed
/// always give the same result.
pub fn simulate_spin_with_grid(
    config: &SimConfig,
    mode: SpinMode,
    fs_remaining_in: u32,
    ladder_index_in: u32,
    initial: Grid,
    seed: Option<u64>,
) -> SimResult<SpinResult> {
    config.validate()?;
    if initial.len() != config.total_cells() {
        return Err(SimError::GridSizeMismatch {
            expected: config.total_cells(),
            actual: initial.len(),
        });
    }
    if initial.cols != config.cols || initial.rows != config.rows {
        return Err(SimError::InvalidGrid {
            cols: initial.cols,
            rows: initial.rows,
        });
    }
    let (mut rng, seed) = spin_rng(seed);
    let weights = config.spin_weights(mode);
    Ok(resolve_spin(
        config,
        mode,
        fs_remaining_in,
        ladder_index_in,
        initial,
        &weights,
        &mut rng,
        seed,
    ))
}

// ═══════════════════════════════════════════════════════════════════════════
// TUMBLE LOOP
// ═══════════════════════════════════════════════════════════════════════════

/// Running state of one spin, threaded through the tumble loop
#[derive(Debug)]
struct SpinFold {
    infusion: ScatterInfusion,
    aftershocks_left: u32,
    any_win: bool,
    ladder_index: u32,
    total_win_x: f64,
    fs_awarded: u32,
    steps: Vec<SpinStep>,
}

impl SpinFold {
    fn new(config: &SimConfig, ladder_index: u32) -> Self {
        Self {
            infusion: ScatterInfusion::new(&config.scatter_infusion),
            aftershocks_left: if config.aftershock.enabled {
                config.aftershock.budget
            } else {
                0
            },
            any_win: false,
            ladder_index,
            total_win_x: 0.0,
            fs_awarded: 0,
            steps: Vec::new(),
        }
    }

    fn can_aftershock(&self) -> bool {
        self.any_win && self.aftershocks_left > 0
    }

    /// Append a step and advance the ladder by one rung
    fn push_step(&mut self, step: SpinStep) {
        self.total_win_x += step.win_x;
        self.fs_awarded += step.fs_awarded;
        self.ladder_index = self.ladder_index.saturating_add(1);
        self.steps.push(step);
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_spin<R: Rng + ?Sized>(
    config: &SimConfig,
    mode: SpinMode,
    fs_remaining_in: u32,
    ladder_index_in: u32,
    initial: Grid,
    weights: &WeightTable,
    rng: &mut R,
    seed: u64,
) -> SpinResult {
    let ladder_start = match mode {
        SpinMode::Base => 0,
        SpinMode::FreeSpins => ladder_index_in,
    };
    let mut fold = SpinFold::new(config, ladder_start);
    let mut tracker = ScatterTracker::new(
        config.scatter_threshold,
        config.fs_award(mode),
        &initial,
    );
    fold.fs_awarded += tracker.initial_award();

    let mut grid = initial.clone();
    let mut termination = SpinTermination::TumbleCap;

    for _ in 0..config.max_tumbles {
        let mut clusters = find_clusters(&grid, &config.paytable);

        if clusters.is_empty() {
            let Some(position) = aftershock(config, &mut fold, &grid, rng) else {
                termination = SpinTermination::DeadBoard;
                break;
            };
            // Scatter count is unchanged, so the tracker has nothing to see.
            let next = with_wild_at(&grid, position);
            let step = SpinStep {
                index: fold.steps.len(),
                grid: std::mem::replace(&mut grid, next.clone()),
                scatter_count: next.scatter_count(),
                next_grid: next,
                clusters: Vec::new(),
                explode_positions: Vec::new(),
                effective_ladder_index: fold.ladder_index,
                multiplier: config.ladder_multiplier(fold.ladder_index),
                win_x: 0.0,
                enchanted_wild_count: 0,
                scatter_infusion_used: false,
                aftershock_wild_spawned: true,
                aftershock_position: Some(position),
                fs_awarded: 0,
            };
            log::trace!("aftershock wild at {position}");
            fold.push_step(step);

            clusters = find_clusters(&grid, &config.paytable);
            if clusters.is_empty() {
                termination = SpinTermination::DeadBoard;
                break;
            }
        }

        let step = win_step(config, mode, &mut fold, &mut tracker, &grid, clusters, weights, rng);
        grid = step.next_grid.clone();
        fold.any_win = true;
        fold.push_step(step);
    }

    let mut total_win_x = fold.total_win_x;
    let win_capped = total_win_x > config.total_winx_cap;
    if win_capped {
        total_win_x = config.total_winx_cap;
    }

    let consumed = u32::from(mode == SpinMode::FreeSpins);
    let fs_remaining_after = fs_remaining_in
        .saturating_sub(consumed)
        .saturating_add(fold.fs_awarded)
        .min(config.fs_total_cap);

    log::debug!(
        "{mode:?} spin seed={seed}: {} steps, win {total_win_x:.2}x, fs +{} -> {fs_remaining_after}, ladder {ladder_start} -> {}",
        fold.steps.len(),
        fold.fs_awarded,
        fold.ladder_index,
    );

    SpinResult {
        mode,
        seed,
        initial_grid: initial,
        steps: fold.steps,
        total_win_x,
        win_capped,
        termination,
        fs_awarded: fold.fs_awarded,
        fs_remaining_after,
        ladder_index_in: ladder_start,
        ladder_index_after: fold.ladder_index,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// STEP HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Spend one aftershock on a dead board, if allowed and a cell is eligible
fn aftershock<R: Rng + ?Sized>(
    config: &SimConfig,
    fold: &mut SpinFold,
    grid: &Grid,
    rng: &mut R,
) -> Option<usize> {
    if !fold.can_aftershock() {
        return None;
    }
    let position = pick_aftershock_cell(grid, &config.aftershock, rng)?;
    fold.aftershocks_left -= 1;
    Some(position)
}

fn with_wild_at(grid: &Grid, position: usize) -> Grid {
    let mut next = grid.clone();
    next.cells[position] = SymbolId::Wild;
    next
}

#[allow(clippy::too_many_arguments)]
fn win_step<R: Rng + ?Sized>(
    config: &SimConfig,
    mode: SpinMode,
    fold: &mut SpinFold,
    tracker: &mut ScatterTracker,
    grid: &Grid,
    mut clusters: Vec<Cluster>,
    weights: &WeightTable,
    rng: &mut R,
) -> SpinStep {
    let enchanted_wild_count = apply_enchanted_wild(&mut clusters, grid, &config.enchanted_wild);
    apply_rtp_scale(&mut clusters, config.rtp_scale.for_mode(mode));

    let (effective_ladder_index, scatter_infusion_used) =
        fold.infusion
            .effective_ladder_index(fold.ladder_index, true, grid.scatter_count());
    let multiplier = config.ladder_multiplier(effective_ladder_index);
    let win_x = clusters.iter().map(|c| c.payout_x).sum::<f64>() * multiplier;

    let explode = explode_positions(&clusters);
    let next_grid = tumble(grid, &explode, weights, rng);
    let fs_awarded = tracker.observe(&next_grid);

    log::trace!(
        "step {}: {} clusters, x{multiplier} -> {win_x:.4}",
        fold.steps.len(),
        clusters.len()
    );

    SpinStep {
        index: fold.steps.len(),
        grid: grid.clone(),
        scatter_count: next_grid.scatter_count(),
        next_grid,
        clusters,
        explode_positions: explode,
        effective_ladder_index,
        multiplier,
        win_x,
        enchanted_wild_count,
        scatter_infusion_used,
        aftershock_wild_spawned: false,
        aftershock_position: None,
        fs_awarded,
    }
}
