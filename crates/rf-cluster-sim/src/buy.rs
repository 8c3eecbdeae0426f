//! Feature-buy pricing
//!
//! A bought feature is a fresh free-spin session of `fs_award_base` spins
//! starting at the rung that carries the requested multiplier. Its fair
//! price is the mean session win.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use rf_cluster_lab::{SessionState, SimConfig, SimResult, derive_seed};

use crate::error::{BatchError, BatchResult};
use crate::rtp::with_pool;
use crate::session::run_session;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyOptions {
    /// Ladder multiplier the bought session starts on
    pub start_multiplier: f64,
    pub sessions: u64,
    pub seed: u64,
    pub threads: Option<usize>,
}

impl Default for BuyOptions {
    fn default() -> Self {
        Self {
            start_multiplier: 1.0,
            sessions: 10_000,
            seed: 1,
            threads: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyReport {
    pub start_multiplier: f64,
    pub ladder_index: u32,
    pub sessions: u64,
    pub spins_awarded: u32,
    /// Fair price in bet multiples
    pub mean_win_x: f64,
    pub std_dev: f64,
    pub max_win_x: f64,
    pub mean_spins: f64,
}

/// Price a feature buy by playing `options.sessions` bought sessions.
///
/// Fails with `LadderStartNotFound` before any spin is played when the start
/// multiplier is not a ladder rung.
pub fn price_feature_buy(config: &SimConfig, options: &BuyOptions) -> BatchResult<BuyReport> {
    config.validate()?;
    let ladder_index = config.ladder_index_of(options.start_multiplier)?;
    if options.sessions == 0 {
        return Err(BatchError::InvalidOption("sessions must be at least 1".into()));
    }

    let state = SessionState::starting_at(config, config.fs_award_base, ladder_index);
    log::info!(
        "Pricing feature buy at x{} (rung {ladder_index}), {} sessions of {} spins",
        options.start_multiplier,
        options.sessions,
        state.fs_remaining
    );

    let outcomes = with_pool(options.threads, || {
        (0..options.sessions)
            .into_par_iter()
            .map(|i| {
                run_session(config, state, derive_seed(options.seed, i))
                    .map(|s| (s.total_win_x, s.spins))
            })
            .collect::<SimResult<Vec<_>>>()
    })??;

    let n = outcomes.len() as f64;
    let mean = outcomes.iter().map(|&(w, _)| w).sum::<f64>() / n;
    let variance = outcomes.iter().map(|&(w, _)| (w - mean).powi(2)).sum::<f64>() / n;
    let max = outcomes.iter().map(|&(w, _)| w).fold(0.0_f64, f64::max);
    let mean_spins = outcomes.iter().map(|&(_, s)| f64::from(s)).sum::<f64>() / n;

    let report = BuyReport {
        start_multiplier: options.start_multiplier,
        ladder_index,
        sessions: options.sessions,
        spins_awarded: state.fs_remaining,
        mean_win_x: mean,
        std_dev: variance.sqrt(),
        max_win_x: max,
        mean_spins,
    };
    log::info!(
        "Feature buy price {:.2}x (sd {:.2})",
        report.mean_win_x,
        report.std_dev
    );
    Ok(report)
}
