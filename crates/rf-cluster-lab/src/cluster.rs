//! Cluster detection
//!
//! For each paying symbol in scan order, flood-fill 4-connected regions of
//! that symbol plus Wilds. Regions of at least [`MIN_CLUSTER_SIZE`] become
//! candidates; candidates are then ranked and accepted greedily so that the
//! returned clusters never share a cell.

use std::cmp::Ordering;
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::paytable::PayTable;
use crate::symbols::{PAYING_SYMBOLS, SymbolId};

/// Smallest paying cluster
pub const MIN_CLUSTER_SIZE: usize = 5;

/// A winning group of connected cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Paid symbol (never Wild or Scatter)
    pub symbol: SymbolId,
    /// Cell indices, ascending
    pub positions: Vec<usize>,
    pub size: usize,
    /// Payout in bet multiples, before the ladder multiplier
    pub payout_x: f64,
}

impl Cluster {
    /// Number of Wild cells in this cluster on `grid`
    pub fn wild_count(&self, grid: &Grid) -> usize {
        self.positions
            .iter()
            .filter(|&&p| grid.cells[p].is_wild())
            .count()
    }

    fn overlaps(&self, claimed: &[bool]) -> bool {
        self.positions.iter().any(|&p| claimed[p])
    }
}

/// Find the disjoint set of paying clusters on `grid`
pub fn find_clusters(grid: &Grid, paytable: &PayTable) -> Vec<Cluster> {
    let mut candidates = Vec::new();
    for target in PAYING_SYMBOLS {
        collect_regions(grid, target, paytable, &mut candidates);
    }
    resolve_overlaps(candidates, grid.len())
}

fn collect_regions(grid: &Grid, target: SymbolId, paytable: &PayTable, out: &mut Vec<Cluster>) {
    let joins = |s: SymbolId| s == target || s.is_wild();
    let mut visited = vec![false; grid.len()];
    let mut queue = VecDeque::new();

    for start in 0..grid.len() {
        if visited[start] || grid.cells[start] != target {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);
        let mut region = Vec::new();

        while let Some(cell) = queue.pop_front() {
            region.push(cell);
            for next in grid.neighbors(cell) {
                if !visited[next] && joins(grid.cells[next]) {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }

        if region.len() >= MIN_CLUSTER_SIZE {
            region.sort_unstable();
            let size = region.len();
            out.push(Cluster {
                symbol: target,
                positions: region,
                size,
                payout_x: paytable.payout(target, size),
            });
        }
    }
}

/// Highest payout first, larger size on equal payout; stable otherwise.
/// Candidates touching an already accepted cell are dropped.
fn resolve_overlaps(mut candidates: Vec<Cluster>, cells: usize) -> Vec<Cluster> {
    candidates.sort_by(|a, b| {
        b.payout_x
            .partial_cmp(&a.payout_x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.size.cmp(&a.size))
    });

    let mut claimed = vec![false; cells];
    let mut accepted = Vec::with_capacity(candidates.len());
    for cluster in candidates {
        if cluster.overlaps(&claimed) {
            continue;
        }
        for &p in &cluster.positions {
            claimed[p] = true;
        }
        accepted.push(cluster);
    }
    accepted
}

/// Sorted union of all cluster positions
pub fn explode_positions(clusters: &[Cluster]) -> Vec<usize> {
    let mut positions: Vec<usize> = clusters
        .iter()
        .flat_map(|c| c.positions.iter().copied())
        .collect();
    positions.sort_unstable();
    positions.dedup();
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paytable::PayBand;

    fn flat_paytable() -> PayTable {
        PayTable::new(vec![PayBand::new(5, u32::MAX, &[1.0; 4], &[1.0; 5])])
    }

    #[test]
    fn test_five_in_a_row_is_a_cluster() {
        let grid = Grid::from_labels(
            5,
            2,
            "H1 H1 H1 H1 H1
             L1 L2 L3 L4 L1",
        )
        .unwrap();
        let clusters = find_clusters(&grid, &PayTable::standard());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].symbol, SymbolId::High(0));
        assert_eq!(clusters[0].positions, vec![0, 1, 2, 3, 4]);
        assert_eq!(clusters[0].payout_x, 0.5);
    }

    #[test]
    fn test_four_cells_do_not_pay() {
        let grid = Grid::from_labels(
            5,
            2,
            "H1 H1 H1 H1 L2
             L1 L2 L3 L4 L1",
        )
        .unwrap();
        assert!(find_clusters(&grid, &PayTable::standard()).is_empty());
    }

    #[test]
    fn test_diagonals_do_not_connect() {
        let grid = Grid::from_labels(
            3,
            3,
            "H1 L1 H1
             L2 H1 L2
             H1 L3 H1",
        )
        .unwrap();
        assert!(find_clusters(&grid, &PayTable::standard()).is_empty());
    }

    #[test]
    fn test_wilds_substitute() {
        let grid = Grid::from_labels(
            5,
            2,
            "L2 W L2 W L2
             L1 L3 L4 L1 L3",
        )
        .unwrap();
        let clusters = find_clusters(&grid, &PayTable::standard());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].symbol, SymbolId::Low(1));
        assert_eq!(clusters[0].wild_count(&grid), 2);
    }

    #[test]
    fn test_wilds_alone_never_pay() {
        let pure_wild = Grid::from_labels(5, 1, "W W W W W").unwrap();
        assert!(find_clusters(&pure_wild, &PayTable::standard()).is_empty());

        let one_real = Grid::from_labels(5, 1, "W W W W L1").unwrap();
        let clusters = find_clusters(&one_real, &PayTable::standard());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].symbol, SymbolId::Low(0));
        assert_eq!(clusters[0].payout_x, 0.2);
    }

    #[test]
    fn test_shared_wild_goes_to_higher_payout() {
        // L1 and H5 both reach five cells through the wild at index 2.
        let grid = Grid::from_labels(
            5,
            2,
            "L1 L1 W H5 H5
             L1 L1 L3 H5 H5",
        )
        .unwrap();
        let clusters = find_clusters(&grid, &PayTable::standard());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].symbol, SymbolId::High(4));
        assert_eq!(clusters[0].positions, vec![2, 3, 4, 8, 9]);
    }

    #[test]
    fn test_equal_payout_prefers_larger_cluster() {
        // Flat payouts: L2 (six cells) beats L1 (five cells) for the shared wild
        // even though L1 is scanned first.
        let grid = Grid::from_labels(
            5,
            3,
            "L2 L2 L2 L2 W
             L2 L4 H1 L1 L1
             L3 L4 H2 L1 L1",
        )
        .unwrap();
        let clusters = find_clusters(&grid, &flat_paytable());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].symbol, SymbolId::Low(1));
        assert_eq!(clusters[0].size, 6);
        assert_eq!(clusters[0].positions, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_full_tie_keeps_scan_order() {
        // L1 and L2 both form five cells through the wild; same payout, same size.
        let grid = Grid::from_labels(
            5,
            3,
            "L1 L1 L1 L1 W
             H1 H2 H3 H4 L2
             H2 H3 L2 L2 L2",
        )
        .unwrap();
        let clusters = find_clusters(&grid, &flat_paytable());
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].symbol, SymbolId::Low(0));
    }

    #[test]
    fn test_disjoint_clusters_both_accepted() {
        let grid = Grid::from_labels(
            5,
            3,
            "L1 L1 L1 L1 L1
             H1 H2 H1 H2 H1
             H3 H3 H3 H3 H3",
        )
        .unwrap();
        let clusters = find_clusters(&grid, &PayTable::standard());
        assert_eq!(clusters.len(), 2);
        assert_eq!(explode_positions(&clusters).len(), 10);
    }
}
