//! Error types for the cluster engine

use thiserror::Error;

use crate::spin::SpinMode;
use crate::symbols::SymbolId;

/// Engine error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid grid: {cols}x{rows}")]
    InvalidGrid { cols: usize, rows: usize },

    #[error("Ladder has no rungs")]
    EmptyLadder,

    #[error("Invalid ladder: {0}")]
    InvalidLadder(String),

    #[error("Weight table for {0:?} mode has no positive weight")]
    EmptyWeights(SpinMode),

    #[error("Invalid weight {weight} for symbol {symbol}")]
    InvalidWeight { symbol: SymbolId, weight: f64 },

    #[error("Paytable has no bands")]
    NoPayBands,

    #[error("Invalid pay band: {0}")]
    InvalidPayBand(String),

    #[error("Grid size mismatch: expected {expected} cells, got {actual}")]
    GridSizeMismatch { expected: usize, actual: usize },

    #[error("start multiplier {0} not found in ladder")]
    LadderStartNotFound(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias
pub type SimResult<T> = Result<T, SimError>;
