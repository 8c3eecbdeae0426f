//! # rf-cluster-sim: Batch drivers for the cluster engine
//!
//! Runs `rf-cluster-lab` spins in bulk:
//!
//! - **Sessions**: play a free-spin session to completion, threading
//!   `fs_remaining` and the ladder index spin to spin
//! - **RTP**: parallel base-game rounds including triggered sessions
//! - **Feature buy**: fair price of a session bought at a given ladder rung
//!
//! Every spin is seeded from a master seed and its index, so reports are
//! reproducible regardless of how rayon schedules the work.

pub mod buy;
pub mod error;
pub mod rtp;
pub mod session;

pub use buy::*;
pub use error::*;
pub use rtp::{RtpOptions, RtpReport, estimate_rtp};
pub use session::*;
