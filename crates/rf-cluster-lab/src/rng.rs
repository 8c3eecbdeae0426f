//! Random sources
//!
//! Every spin runs on a [`SpinRng`] seeded from a `u64`. ChaCha output is
//! identical across platforms, so a seed fully determines a spin.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator driving a single spin
pub type SpinRng = ChaCha8Rng;

/// Build the generator for a spin.
///
/// `None` opts out of reproducibility: a fresh seed is drawn from the thread
/// generator. The seed actually used is returned either way so the spin can
/// be replayed.
pub fn spin_rng(seed: Option<u64>) -> (SpinRng, u64) {
    let seed = seed.unwrap_or_else(|| {
        let fresh = rand::rng().random::<u64>();
        log::debug!("No seed supplied, drew entropy seed {fresh}");
        fresh
    });
    (SpinRng::seed_from_u64(seed), seed)
}

/// Uniform draw in [0, 1)
#[inline]
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}

/// Derive an independent per-item seed from a master seed (SplitMix64).
///
/// Batch drivers seed spin `i` with `derive_seed(master, i)` so results do
/// not depend on how work is scheduled across threads.
pub fn derive_seed(master: u64, index: u64) -> u64 {
    let mut z = master
        .wrapping_add(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
