//! Board layout and generation
//!
//! A grid is a row-major sequence of cells: `index = row * cols + col`,
//! row 0 at the top.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::sampler::WeightTable;
use crate::symbols::SymbolId;

/// Board snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<SymbolId>,
}

impl Grid {
    /// Wrap existing cells; length must equal `cols * rows`
    pub fn new(cols: usize, rows: usize, cells: Vec<SymbolId>) -> SimResult<Self> {
        let expected = match cols.checked_mul(rows) {
            Some(cells) if cells > 0 => cells,
            _ => return Err(SimError::InvalidGrid { cols, rows }),
        };
        if cells.len() != expected {
            return Err(SimError::GridSizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { cols, rows, cells })
    }

    /// Parse whitespace-separated labels, one board row per line.
    ///
    /// ```
    /// use rf_cluster_lab::Grid;
    /// let grid = Grid::from_labels(3, 2, "L1 L2 W\nS H5 L4").unwrap();
    /// assert_eq!(grid.scatter_count(), 1);
    /// ```
    pub fn from_labels(cols: usize, rows: usize, text: &str) -> SimResult<Self> {
        let cells = text
            .split_whitespace()
            .map(|label| {
                label
                    .parse::<SymbolId>()
                    .map_err(|e| SimError::InvalidParam(e.to_string()))
            })
            .collect::<SimResult<Vec<_>>>()?;
        Self::new(cols, rows, cells)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// (row, col) of a cell index
    #[inline]
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> SymbolId {
        self.cells[self.index(row, col)]
    }

    /// Up, down, left, right neighbours of `index` that lie on the board
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let (row, col) = self.row_col(index);
        let up = (row > 0).then(|| index - self.cols);
        let down = (row + 1 < self.rows).then(|| index + self.cols);
        let left = (col > 0).then(|| index - 1);
        let right = (col + 1 < self.cols).then(|| index + 1);
        [up, down, left, right].into_iter().flatten()
    }

    pub fn count(&self, symbol: SymbolId) -> usize {
        self.cells.iter().filter(|&&s| s == symbol).count()
    }

    pub fn scatter_count(&self) -> usize {
        self.count(SymbolId::Scatter)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>2}", self.get(row, col).to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Fill a `cols x rows` board with independent draws, row-major order
pub fn generate_grid<R: Rng + ?Sized>(
    cols: usize,
    rows: usize,
    weights: &WeightTable,
    rng: &mut R,
) -> Grid {
    let cells = (0..cols * rows).map(|_| weights.sample(rng)).collect();
    Grid { cols, rows, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::spin_rng;

    #[test]
    fn test_row_major_indexing() {
        let grid = Grid::from_labels(3, 2, "L1 L2 L3\nH1 H2 H3").unwrap();
        assert_eq!(grid.get(0, 2), SymbolId::Low(2));
        assert_eq!(grid.get(1, 0), SymbolId::High(0));
        assert_eq!(grid.index(1, 2), 5);
        assert_eq!(grid.row_col(4), (1, 1));
    }

    #[test]
    fn test_neighbors_are_orthogonal_and_clipped() {
        let grid = Grid::from_labels(3, 3, "L1 L1 L1 L1 L1 L1 L1 L1 L1").unwrap();
        let mut corner: Vec<usize> = grid.neighbors(0).collect();
        corner.sort();
        assert_eq!(corner, vec![1, 3]);

        let mut center: Vec<usize> = grid.neighbors(4).collect();
        center.sort();
        assert_eq!(center, vec![1, 3, 5, 7]);

        let mut edge: Vec<usize> = grid.neighbors(5).collect();
        edge.sort();
        assert_eq!(edge, vec![2, 4, 8]);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        assert_eq!(
            Grid::from_labels(2, 2, "L1 L2 L3"),
            Err(SimError::GridSizeMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert!(matches!(
            Grid::new(0, 5, Vec::new()),
            Err(SimError::InvalidGrid { .. })
        ));
        assert!(matches!(
            Grid::new(usize::MAX, 2, Vec::new()),
            Err(SimError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_generate_is_seed_stable() {
        let weights = WeightTable::new(&[
            (SymbolId::Low(0), 5.0),
            (SymbolId::High(0), 3.0),
            (SymbolId::Scatter, 1.0),
        ]);
        let (mut a, _) = spin_rng(Some(12345));
        let (mut b, _) = spin_rng(Some(12345));
        let first = generate_grid(6, 5, &weights, &mut a);
        let second = generate_grid(6, 5, &weights, &mut b);
        assert_eq!(first, second);
        assert_eq!(first.len(), 30);
    }

    #[test]
    fn test_display_round_trips_through_labels() {
        let grid = Grid::from_labels(2, 2, "W S\nH5 L4").unwrap();
        let text = grid.to_string();
        assert_eq!(Grid::from_labels(2, 2, &text).unwrap(), grid);
    }
}
