//! Cluster paytable
//!
//! Payout is looked up by cluster size in an ordered list of bands. Each band
//! carries one multiplier per low-pay ordinal and one per high-pay ordinal.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::symbols::{HIGH_COUNT, LOW_COUNT, SymbolId};

/// Cluster-size range mapped to per-symbol payouts (bet multiples)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayBand {
    /// Smallest size covered (inclusive)
    pub min: u32,
    /// Largest size covered (inclusive)
    pub max: u32,
    /// Payout per low-pay ordinal (L1..L4)
    pub low: Vec<f64>,
    /// Payout per high-pay ordinal (H1..H5)
    pub high: Vec<f64>,
}

impl PayBand {
    pub fn new(min: u32, max: u32, low: &[f64], high: &[f64]) -> Self {
        Self {
            min,
            max,
            low: low.to_vec(),
            high: high.to_vec(),
        }
    }

    pub fn contains(&self, size: u32) -> bool {
        size >= self.min && size <= self.max
    }

    /// Payout for a paying symbol; 0 for Wild and Scatter
    pub fn pay_for(&self, symbol: SymbolId) -> f64 {
        let column = match symbol {
            SymbolId::Low(_) => &self.low,
            SymbolId::High(_) => &self.high,
            SymbolId::Wild | SymbolId::Scatter => return 0.0,
        };
        column.get(symbol.ordinal()).copied().unwrap_or(0.0)
    }
}

/// Ordered list of pay bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayTable {
    pub bands: Vec<PayBand>,
}

impl PayTable {
    pub fn new(bands: Vec<PayBand>) -> Self {
        Self { bands }
    }

    /// Default cluster paytable (6 bands, 5 to unbounded)
    pub fn standard() -> Self {
        Self::new(vec![
            PayBand::new(5, 6, &[0.2, 0.25, 0.3, 0.4], &[0.5, 0.6, 0.8, 1.0, 1.5]),
            PayBand::new(7, 8, &[0.4, 0.5, 0.6, 0.8], &[1.0, 1.2, 1.5, 2.0, 3.0]),
            PayBand::new(9, 10, &[0.8, 1.0, 1.2, 1.5], &[2.0, 2.5, 3.0, 4.0, 6.0]),
            PayBand::new(11, 12, &[1.5, 2.0, 2.5, 3.0], &[4.0, 5.0, 6.0, 8.0, 12.0]),
            PayBand::new(13, 15, &[3.0, 4.0, 5.0, 6.0], &[8.0, 10.0, 12.0, 16.0, 25.0]),
            PayBand::new(
                16,
                u32::MAX,
                &[6.0, 8.0, 10.0, 12.0],
                &[16.0, 20.0, 25.0, 35.0, 50.0],
            ),
        ])
    }

    /// First band whose range contains `size`, else the first band
    pub fn band_for(&self, size: u32) -> Option<&PayBand> {
        self.bands.iter().find(|b| b.contains(size)).or_else(|| {
            log::warn!("No pay band covers cluster size {size}, using first band");
            self.bands.first()
        })
    }

    /// Base payout (bet multiples) of a cluster of `size` paying `symbol`
    pub fn payout(&self, symbol: SymbolId, size: usize) -> f64 {
        let size = u32::try_from(size).unwrap_or(u32::MAX);
        self.band_for(size).map(|b| b.pay_for(symbol)).unwrap_or(0.0)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.bands.is_empty() {
            return Err(SimError::NoPayBands);
        }
        for band in &self.bands {
            if band.min > band.max {
                return Err(SimError::InvalidPayBand(format!(
                    "min {} above max {}",
                    band.min, band.max
                )));
            }
            if band.low.len() != LOW_COUNT as usize || band.high.len() != HIGH_COUNT as usize {
                return Err(SimError::InvalidPayBand(format!(
                    "band {}..={} needs {LOW_COUNT} low and {HIGH_COUNT} high payouts",
                    band.min, band.max
                )));
            }
            if band.low.iter().chain(&band.high).any(|p| !p.is_finite() || *p < 0.0) {
                return Err(SimError::InvalidPayBand(format!(
                    "band {}..={} has a negative or non-finite payout",
                    band.min, band.max
                )));
            }
        }
        Ok(())
    }
}

impl Default for PayTable {
    fn default() -> Self {
        Self::standard()
    }
}
