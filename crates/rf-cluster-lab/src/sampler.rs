//! Weighted symbol sampling

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::rng::unit;
use crate::spin::SpinMode;
use crate::symbols::SymbolId;

/// One row of a weight table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub symbol: SymbolId,
    pub weight: f64,
}

/// Symbol weights, walked in stored order when sampling
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    pub entries: Vec<WeightEntry>,
}

impl WeightTable {
    pub fn new(entries: &[(SymbolId, f64)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|&(symbol, weight)| WeightEntry { symbol, weight })
                .collect(),
        }
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn weight_of(&self, symbol: SymbolId) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.symbol == symbol)
            .map(|e| e.weight)
            .sum()
    }

    /// Multiply every entry for `symbol` by `factor`
    pub fn scale(&mut self, symbol: SymbolId, factor: f64) {
        for entry in self.entries.iter_mut().filter(|e| e.symbol == symbol) {
            entry.weight *= factor;
        }
    }

    /// Draw one symbol with probability proportional to its weight.
    ///
    /// Falls back to the first entry when the table has no positive weight;
    /// an empty table yields [`SymbolId::Low`]`(0)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SymbolId {
        let total = self.total();
        let Some(first) = self.entries.first() else {
            log::warn!("Weight table is empty, falling back to {}", SymbolId::Low(0));
            return SymbolId::Low(0);
        };
        if total.is_nan() || total <= 0.0 {
            log::warn!("Weight table has no positive weight, falling back to {}", first.symbol);
            return first.symbol;
        }
        let r = unit(rng) * total;
        let mut acc = 0.0;
        for entry in &self.entries {
            acc += entry.weight;
            if acc >= r {
                return entry.symbol;
            }
        }
        first.symbol
    }

    pub fn validate(&self, mode: SpinMode) -> SimResult<()> {
        for entry in &self.entries {
            if !entry.symbol.is_valid() {
                return Err(SimError::InvalidParam(format!(
                    "symbol {:?} out of range in {mode:?} weights",
                    entry.symbol
                )));
            }
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(SimError::InvalidWeight {
                    symbol: entry.symbol,
                    weight: entry.weight,
                });
            }
        }
        if self.total() <= 0.0 {
            return Err(SimError::EmptyWeights(mode));
        }
        Ok(())
    }
}

/// Cumulative-weight pick over `entries` in order.
///
/// Draws `r = rand * total` and returns the first entry whose running weight
/// reaches `r`. If rounding leaves no match the first entry is returned.
/// Returns `None` only when the total weight is not positive.
pub fn pick_weighted<T: Copy, R: Rng + ?Sized>(entries: &[(T, f64)], rng: &mut R) -> Option<T> {
    let total: f64 = entries.iter().map(|&(_, w)| w).sum();
    if total.is_nan() || total <= 0.0 {
        return None;
    }
    let r = unit(rng) * total;
    let mut acc = 0.0;
    for &(item, weight) in entries {
        acc += weight;
        if acc >= r {
            return Some(item);
        }
    }
    entries.first().map(|&(item, _)| item)
}
