//! Spin results and carried session state

use serde::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::config::SimConfig;
use crate::engine::simulate_spin;
use crate::error::SimResult;
use crate::grid::Grid;

/// Which game mode a spin is played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinMode {
    Base,
    FreeSpins,
}

/// Why the tumble loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinTermination {
    /// No cluster left and no aftershock to rescue the board
    DeadBoard,
    /// `max_tumbles` iterations ran
    TumbleCap,
}

/// One tumble iteration, in replay order.
///
/// `grid` -> `next_grid` plus `clusters`, `explode_positions` and `multiplier`
/// is everything a presentation layer needs to animate the step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinStep {
    /// Position in `SpinResult::steps`
    pub index: usize,
    /// Board before this step
    pub grid: Grid,
    /// Board after this step
    pub next_grid: Grid,
    pub clusters: Vec<Cluster>,
    pub explode_positions: Vec<usize>,
    /// Ladder index read for this step (after any scatter infusion)
    pub effective_ladder_index: u32,
    /// Ladder multiplier applied to this step's clusters
    pub multiplier: f64,
    /// Sum of cluster payouts times `multiplier`
    pub win_x: f64,
    /// Clusters boosted by the enchanted wild
    pub enchanted_wild_count: u32,
    pub scatter_infusion_used: bool,
    pub aftershock_wild_spawned: bool,
    pub aftershock_position: Option<usize>,
    /// Scatters on `next_grid`
    pub scatter_count: usize,
    /// Free spins awarded by the scatter crossing on `next_grid`
    pub fs_awarded: u32,
}

/// Outcome of one `simulate_spin` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinResult {
    pub mode: SpinMode,
    /// Seed the spin ran on
    pub seed: u64,
    pub initial_grid: Grid,
    pub steps: Vec<SpinStep>,
    /// Total win in bet multiples, capped
    pub total_win_x: f64,
    /// Total win was cut down to the cap
    pub win_capped: bool,
    pub termination: SpinTermination,
    pub fs_awarded: u32,
    pub fs_remaining_after: u32,
    /// Ladder index the spin started from (always 0 in base mode)
    pub ladder_index_in: u32,
    /// Ladder index to carry into the next free spin
    pub ladder_index_after: u32,
}

impl SpinResult {
    pub fn is_win(&self) -> bool {
        self.total_win_x > 0.0
    }

    /// Board left showing when the spin ended
    pub fn final_grid(&self) -> &Grid {
        self.steps
            .last()
            .map(|s| &s.next_grid)
            .unwrap_or(&self.initial_grid)
    }

    /// Steps that paid (aftershock spawns excluded)
    pub fn winning_steps(&self) -> usize {
        self.steps.iter().filter(|s| !s.clusters.is_empty()).count()
    }

    pub fn triggered_free_spins(&self) -> bool {
        self.fs_awarded > 0
    }
}

/// Free-spin counters carried between spins by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub fs_remaining: u32,
    pub ladder_index: u32,
}

impl SessionState {
    /// Fresh session after a trigger, capped like any award
    pub fn enter_free_spins(config: &SimConfig, award: u32) -> Self {
        Self {
            fs_remaining: award.min(config.fs_total_cap),
            ladder_index: 0,
        }
    }

    /// Session starting at a given ladder index (feature buy)
    pub fn starting_at(config: &SimConfig, award: u32, ladder_index: u32) -> Self {
        Self {
            ladder_index,
            ..Self::enter_free_spins(config, award)
        }
    }

    pub fn is_active(&self) -> bool {
        self.fs_remaining > 0
    }

    /// Play the next free spin and carry its counters forward
    pub fn spin(&mut self, config: &SimConfig, seed: Option<u64>) -> SimResult<SpinResult> {
        let result = simulate_spin(
            config,
            SpinMode::FreeSpins,
            self.fs_remaining,
            self.ladder_index,
            seed,
        )?;
        self.fs_remaining = result.fs_remaining_after;
        self.ladder_index = result.ladder_index_after;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_consumes_and_carries_ladder() {
        let config = SimConfig::default();
        let mut session = SessionState::enter_free_spins(&config, 3);
        assert!(session.is_active());

        let before = session;
        let result = session.spin(&config, Some(77)).unwrap();
        assert_eq!(result.mode, SpinMode::FreeSpins);
        assert_eq!(result.ladder_index_in, before.ladder_index);
        assert_eq!(session.ladder_index, result.ladder_index_after);
        assert_eq!(
            session.fs_remaining,
            (before.fs_remaining - 1 + result.fs_awarded).min(config.fs_total_cap)
        );
    }

    #[test]
    fn test_enter_free_spins_caps_award() {
        let config = SimConfig::default();
        let session = SessionState::enter_free_spins(&config, 500);
        assert_eq!(session.fs_remaining, config.fs_total_cap);
        let bought = SessionState::starting_at(&config, 10, 4);
        assert_eq!((bought.fs_remaining, bought.ladder_index), (10, 4));
    }
}
