//! Scatter count tracking and free-spin awards

use crate::grid::Grid;

/// Watches scatter counts across a spin's boards.
///
/// Awards on the initial board when it already meets the threshold, and
/// afterwards only when a tumble crosses from below the threshold to at or
/// above it. Staying above the threshold does not award again.
#[derive(Debug, Clone)]
pub struct ScatterTracker {
    threshold: usize,
    award: u32,
    previous: usize,
    initial_award: u32,
}

impl ScatterTracker {
    pub fn new(threshold: usize, award: u32, initial: &Grid) -> Self {
        let previous = initial.scatter_count();
        let initial_award = if previous >= threshold { award } else { 0 };
        Self {
            threshold,
            award,
            previous,
            initial_award,
        }
    }

    /// Free spins the initial board is worth
    pub fn initial_award(&self) -> u32 {
        self.initial_award
    }

    /// Scatters on the last observed board
    pub fn current(&self) -> usize {
        self.previous
    }

    /// Record the board a tumble produced and return any award for it
    pub fn observe(&mut self, next: &Grid) -> u32 {
        let count = next.scatter_count();
        let crossed = self.previous < self.threshold && count >= self.threshold;
        self.previous = count;
        if crossed { self.award } else { 0 }
    }
}
