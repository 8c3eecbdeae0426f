//! Parallel RTP estimation
//!
//! Every round is one base spin plus, when it triggers, the whole free-spin
//! session it awards. Rounds are split into fixed chunks that run on the
//! rayon pool; chunk tallies are merged in index order so the report does
//! not depend on the thread count.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use rf_cluster_lab::{
    SessionState, SimConfig, SimResult, SpinMode, SpinTermination, derive_seed, simulate_spin,
};

use crate::error::{BatchError, BatchResult};
use crate::session::run_session;

/// Rounds per parallel work item
const CHUNK: u64 = 4096;

/// Mixed into the master seed for free-spin sessions
const SESSION_SALT: u64 = 0x5E55_1011_F5F5_0001;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtpOptions {
    /// Base-game rounds to play
    pub spins: u64,
    pub seed: u64,
    /// Worker threads, `None` for one per CPU
    pub threads: Option<usize>,
}

impl Default for RtpOptions {
    fn default() -> Self {
        Self {
            spins: 100_000,
            seed: 1,
            threads: None,
        }
    }
}

/// Aggregate statistics over all rounds, in bet multiples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RtpReport {
    pub spins: u64,
    pub base_rtp: f64,
    pub free_spins_rtp: f64,
    pub total_rtp: f64,
    /// Share of base spins that paid
    pub hit_rate: f64,
    /// Share of base spins that awarded free spins
    pub trigger_rate: f64,
    /// Largest single round (base spin plus its session)
    pub max_win_x: f64,
    pub free_spins_played: u64,
    pub tumble_cap_hits: u64,
    pub win_cap_hits: u64,
    pub session_guard_hits: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    rounds: u64,
    base_win: f64,
    fs_win: f64,
    hits: u64,
    triggers: u64,
    max_win: f64,
    fs_spins: u64,
    tumble_caps: u64,
    win_caps: u64,
    guard_hits: u64,
}

impl Tally {
    fn merge(mut self, other: Tally) -> Tally {
        self.rounds += other.rounds;
        self.base_win += other.base_win;
        self.fs_win += other.fs_win;
        self.hits += other.hits;
        self.triggers += other.triggers;
        self.max_win = self.max_win.max(other.max_win);
        self.fs_spins += other.fs_spins;
        self.tumble_caps += other.tumble_caps;
        self.win_caps += other.win_caps;
        self.guard_hits += other.guard_hits;
        self
    }

    fn into_report(self) -> RtpReport {
        let n = self.rounds.max(1) as f64;
        let total = self.base_win + self.fs_win;
        RtpReport {
            spins: self.rounds,
            base_rtp: self.base_win / n,
            free_spins_rtp: self.fs_win / n,
            total_rtp: total / n,
            hit_rate: self.hits as f64 / n,
            trigger_rate: self.triggers as f64 / n,
            max_win_x: self.max_win,
            free_spins_played: self.fs_spins,
            tumble_cap_hits: self.tumble_caps,
            win_cap_hits: self.win_caps,
            session_guard_hits: self.guard_hits,
        }
    }
}

fn play_round(config: &SimConfig, master_seed: u64, index: u64) -> SimResult<Tally> {
    let seed = derive_seed(master_seed, index);
    let base = simulate_spin(config, SpinMode::Base, 0, 0, Some(seed))?;
    let mut tally = Tally {
        rounds: 1,
        base_win: base.total_win_x,
        hits: u64::from(base.is_win()),
        tumble_caps: u64::from(base.termination == SpinTermination::TumbleCap),
        win_caps: u64::from(base.win_capped),
        ..Default::default()
    };

    if base.fs_remaining_after > 0 {
        tally.triggers = 1;
        let state = SessionState {
            fs_remaining: base.fs_remaining_after,
            ladder_index: 0,
        };
        let session = run_session(config, state, derive_seed(master_seed ^ SESSION_SALT, index))?;
        tally.fs_win = session.total_win_x;
        tally.fs_spins = u64::from(session.spins);
        tally.tumble_caps += u64::from(session.tumble_cap_hits);
        tally.win_caps += u64::from(session.win_cap_hits);
        tally.guard_hits = u64::from(session.guard_hit);
    }
    tally.max_win = tally.base_win + tally.fs_win;
    Ok(tally)
}

fn play_chunk(config: &SimConfig, master_seed: u64, start: u64, end: u64) -> SimResult<Tally> {
    (start..end).try_fold(Tally::default(), |acc, i| {
        Ok(acc.merge(play_round(config, master_seed, i)?))
    })
}

/// Run a thread pool with `threads` workers, or one per CPU
pub(crate) fn with_pool<T: Send>(
    threads: Option<usize>,
    job: impl FnOnce() -> T + Send,
) -> BatchResult<T> {
    let threads = threads.unwrap_or_else(num_cpus::get);
    if threads == 0 {
        return Err(BatchError::InvalidOption("threads must be at least 1".into()));
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    Ok(pool.install(job))
}

/// Estimate return-to-player over `options.spins` rounds
pub fn estimate_rtp(config: &SimConfig, options: &RtpOptions) -> BatchResult<RtpReport> {
    config.validate()?;
    if options.spins == 0 {
        return Err(BatchError::InvalidOption("spins must be at least 1".into()));
    }

    log::info!(
        "Estimating RTP over {} rounds (seed {})",
        options.spins,
        options.seed
    );

    let chunks = options.spins.div_ceil(CHUNK);
    let tallies = with_pool(options.threads, || {
        (0..chunks)
            .into_par_iter()
            .map(|c| {
                let start = c * CHUNK;
                let end = (start + CHUNK).min(options.spins);
                play_chunk(config, options.seed, start, end)
            })
            .collect::<SimResult<Vec<_>>>()
    })??;

    let report = tallies
        .into_iter()
        .fold(Tally::default(), Tally::merge)
        .into_report();

    log::info!(
        "RTP {:.4} (base {:.4}, free spins {:.4}), hit rate {:.4}, trigger rate {:.5}",
        report.total_rtp,
        report.base_rtp,
        report.free_spins_rtp,
        report.hit_rate,
        report.trigger_rate
    );
    Ok(report)
}
