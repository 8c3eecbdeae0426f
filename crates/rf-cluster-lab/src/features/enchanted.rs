//! Enchanted wild boost and RTP scaling of cluster payouts

use crate::cluster::Cluster;
use crate::config::EnchantedWildConfig;
use crate::grid::Grid;

/// Boost every cluster holding at least `min_wilds` wilds.
///
/// Returns how many clusters were boosted.
pub fn apply_enchanted_wild(
    clusters: &mut [Cluster],
    grid: &Grid,
    config: &EnchantedWildConfig,
) -> u32 {
    if !config.enabled {
        return 0;
    }
    let mut boosted = 0;
    for cluster in clusters.iter_mut() {
        if cluster.wild_count(grid) >= config.min_wilds {
            cluster.payout_x *= config.boost;
            boosted += 1;
        }
    }
    boosted
}

/// Last payout adjustment before the ladder multiplier
pub fn apply_rtp_scale(clusters: &mut [Cluster], scale: f64) {
    for cluster in clusters.iter_mut() {
        cluster.payout_x *= scale;
    }
}
