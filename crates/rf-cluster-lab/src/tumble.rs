//! Tumble resolution: explode, drop, refill

use rand::Rng;

use crate::grid::Grid;
use crate::sampler::WeightTable;

/// Produce the board after removing `exploded` cells.
///
/// Each column is handled on its own: surviving cells keep their order and
/// fall to the bottom, then fresh draws fill the column from the bottom of
/// the gap upwards. Columns are refilled left to right.
pub fn tumble<R: Rng + ?Sized>(
    grid: &Grid,
    exploded: &[usize],
    weights: &WeightTable,
    rng: &mut R,
) -> Grid {
    let mut removed = vec![false; grid.len()];
    for &p in exploded {
        if let Some(slot) = removed.get_mut(p) {
            *slot = true;
        }
    }

    let mut next = grid.clone();
    let mut column = Vec::with_capacity(grid.rows);
    for col in 0..grid.cols {
        column.clear();
        for row in (0..grid.rows).rev() {
            let index = grid.index(row, col);
            if !removed[index] {
                column.push(grid.cells[index]);
            }
        }
        while column.len() < grid.rows {
            column.push(weights.sample(rng));
        }
        for (offset, &symbol) in column.iter().enumerate() {
            let row = grid.rows - 1 - offset;
            next.cells[grid.index(row, col)] = symbol;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::spin_rng;
    use crate::symbols::SymbolId;

    fn scatter_only() -> WeightTable {
        WeightTable::new(&[(SymbolId::Scatter, 1.0)])
    }

    #[test]
    fn test_survivors_drop_and_top_refills() {
        let grid = Grid::from_labels(
            2,
            3,
            "L1 H1
             L2 H2
             L3 H3",
        )
        .unwrap();
        let (mut rng, _) = spin_rng(Some(1));
        // Remove the middle of column 0 and the bottom of column 1.
        let next = tumble(&grid, &[2, 5], &scatter_only(), &mut rng);
        let expected = Grid::from_labels(
            2,
            3,
            "S  S
             L1 H1
             L3 H2",
        )
        .unwrap();
        assert_eq!(next, expected);
    }

    #[test]
    fn test_untouched_columns_are_unchanged() {
        let grid = Grid::from_labels(3, 2, "L1 L2 L3 H1 H2 H3").unwrap();
        let (mut rng, _) = spin_rng(Some(1));
        let next = tumble(&grid, &[0, 3], &scatter_only(), &mut rng);
        assert_eq!(next.get(0, 1), SymbolId::Low(1));
        assert_eq!(next.get(1, 2), SymbolId::High(2));
        assert_eq!(next.get(0, 0), SymbolId::Scatter);
        assert_eq!(next.get(1, 0), SymbolId::Scatter);
    }

    #[test]
    fn test_nothing_exploded_draws_nothing() {
        let grid = Grid::from_labels(2, 2, "L1 L2 H1 H2").unwrap();
        let (mut rng, _) = spin_rng(Some(5));
        let (mut untouched, _) = spin_rng(Some(5));
        let weights = WeightTable::new(&[(SymbolId::Low(0), 1.0), (SymbolId::High(0), 1.0)]);
        let next = tumble(&grid, &[], &weights, &mut rng);
        assert_eq!(next, grid);
        assert_eq!(rng.random::<u64>(), untouched.random::<u64>());
    }
}
