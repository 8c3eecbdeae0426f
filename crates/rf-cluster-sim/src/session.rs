//! Free-spin session runner

use serde::{Deserialize, Serialize};

use rf_cluster_lab::{SessionState, SimConfig, SimResult, SpinTermination, derive_seed};

/// Hard stop for sessions that keep retriggering
pub const MAX_SESSION_SPINS: u32 = 10_000;

/// Outcome of one complete free-spin session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub spins: u32,
    pub total_win_x: f64,
    /// Spins that awarded more free spins
    pub retriggers: u32,
    /// Free spins awarded during the session (before the cap)
    pub fs_awarded: u32,
    pub final_ladder_index: u32,
    pub tumble_cap_hits: u32,
    pub win_cap_hits: u32,
    /// Session was cut short by [`MAX_SESSION_SPINS`]
    pub guard_hit: bool,
}

/// Play free spins from `state` until none remain.
///
/// Spin `i` is seeded with `derive_seed(master_seed, i)`.
pub fn run_session(
    config: &SimConfig,
    mut state: SessionState,
    master_seed: u64,
) -> SimResult<SessionSummary> {
    let mut summary = SessionSummary {
        final_ladder_index: state.ladder_index,
        ..Default::default()
    };

    while state.is_active() {
        if summary.spins >= MAX_SESSION_SPINS {
            log::warn!(
                "Session stopped after {MAX_SESSION_SPINS} spins with {} free spins left",
                state.fs_remaining
            );
            summary.guard_hit = true;
            break;
        }

        let result = state.spin(config, Some(derive_seed(master_seed, u64::from(summary.spins))))?;
        summary.spins += 1;
        summary.total_win_x += result.total_win_x;
        summary.fs_awarded += result.fs_awarded;
        if result.triggered_free_spins() {
            summary.retriggers += 1;
        }
        if result.termination == SpinTermination::TumbleCap {
            summary.tumble_cap_hits += 1;
        }
        if result.win_capped {
            summary.win_cap_hits += 1;
        }
    }

    summary.final_ladder_index = state.ladder_index;
    log::debug!(
        "Session done: {} spins, {:.2}x, ladder {}",
        summary.spins,
        summary.total_win_x,
        summary.final_ladder_index
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_drains_free_spins() {
        let config = SimConfig::default();
        let state = SessionState::enter_free_spins(&config, 10);
        let summary = run_session(&config, state, 42).unwrap();
        assert!(!summary.guard_hit);
        assert!(summary.spins >= 10);
        assert!(summary.final_ladder_index >= state.ladder_index);
        assert!(summary.total_win_x >= 0.0);
    }

    #[test]
    fn test_session_is_reproducible() {
        let config = SimConfig::default();
        let state = SessionState::starting_at(&config, 10, 3);
        let a = run_session(&config, state, 7).unwrap();
        let b = run_session(&config, state, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.final_ladder_index >= 3);
    }

    #[test]
    fn test_inactive_state_plays_nothing() {
        let config = SimConfig::default();
        let summary = run_session(&config, SessionState::default(), 1).unwrap();
        assert_eq!(summary.spins, 0);
        assert_eq!(summary.total_win_x, 0.0);
    }
}
