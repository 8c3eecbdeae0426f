//! # rf-cluster-lab: Cluster-pays tumbling slot engine
//!
//! Pure, deterministic outcome generation for a cluster-pays game with
//! tumbling reels, a multiplier ladder and free-spin sessions.
//!
//! ## Features
//!
//! - **Cluster Finder**: orthogonal flood fill with wild substitution
//! - **Tumble Resolver**: explode, drop survivors, refill from the sampler
//! - **Multiplier Ladder**: one rung per tumble step, carried across free spins
//! - **Sub-features**: enchanted wild boost, scatter infusion, aftershock wild
//! - **Seeded RNG**: ChaCha8 per spin, seed echoed in every result
//!
//! ## Architecture
//!
//! ```text
//! SimConfig ──► simulate_spin(mode, fs_remaining, ladder_index, seed)
//!                   │
//!                   ├── generate_grid (WeightTable sampler)
//!                   └── loop ≤ max_tumbles
//!                         ├── find_clusters (PayTable)
//!                         ├── features (enchanted / rtp scale / infusion / aftershock)
//!                         ├── tumble
//!                         └── ScatterTracker
//!                   │
//!                   v
//!               SpinResult { steps, total_win_x, fs_remaining_after, ladder_index_after }
//! ```
//!
//! Session counters live in [`SessionState`] and are owned by the caller.

pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod grid;
pub mod paytable;
pub mod rng;
pub mod sampler;
pub mod spin;
pub mod symbols;
pub mod tumble;

pub use cluster::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use features::*;
pub use grid::*;
pub use paytable::*;
pub use rng::*;
pub use sampler::*;
pub use spin::*;
pub use symbols::*;
pub use tumble::*;
