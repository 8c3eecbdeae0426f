//! Symbol definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of low-pay symbols
pub const LOW_COUNT: u8 = 4;
/// Number of high-pay symbols
pub const HIGH_COUNT: u8 = 5;

/// Symbol category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolCategory {
    /// Low paying (L1..L4)
    Low,
    /// High paying (H1..H5)
    High,
    /// Substitutes for any paying symbol, never pays on its own
    Wild,
    /// Triggers free spins, never part of a cluster
    Scatter,
}

/// Tile kind. Category and ordinal are carried directly by the variant.
///
/// Serialized as its short label (`L1`, `H5`, `W`, `S`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SymbolId {
    /// Low-pay symbol, ordinal `0..LOW_COUNT`
    Low(u8),
    /// High-pay symbol, ordinal `0..HIGH_COUNT`
    High(u8),
    Wild,
    Scatter,
}

/// Paying symbols in cluster scan order (lows first, then highs)
pub const PAYING_SYMBOLS: [SymbolId; 9] = [
    SymbolId::Low(0),
    SymbolId::Low(1),
    SymbolId::Low(2),
    SymbolId::Low(3),
    SymbolId::High(0),
    SymbolId::High(1),
    SymbolId::High(2),
    SymbolId::High(3),
    SymbolId::High(4),
];

/// Every symbol in weight-table order
pub const ALL_SYMBOLS: [SymbolId; 11] = [
    SymbolId::Low(0),
    SymbolId::Low(1),
    SymbolId::Low(2),
    SymbolId::Low(3),
    SymbolId::High(0),
    SymbolId::High(1),
    SymbolId::High(2),
    SymbolId::High(3),
    SymbolId::High(4),
    SymbolId::Wild,
    SymbolId::Scatter,
];

impl SymbolId {
    pub fn category(&self) -> SymbolCategory {
        match self {
            SymbolId::Low(_) => SymbolCategory::Low,
            SymbolId::High(_) => SymbolCategory::High,
            SymbolId::Wild => SymbolCategory::Wild,
            SymbolId::Scatter => SymbolCategory::Scatter,
        }
    }

    /// Ordinal within the category (0 for Wild and Scatter)
    pub fn ordinal(&self) -> usize {
        match self {
            SymbolId::Low(i) | SymbolId::High(i) => *i as usize,
            SymbolId::Wild | SymbolId::Scatter => 0,
        }
    }

    /// Can this symbol be the paid symbol of a cluster?
    pub fn is_paying(&self) -> bool {
        matches!(self, SymbolId::Low(_) | SymbolId::High(_))
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, SymbolId::Wild)
    }

    pub fn is_scatter(&self) -> bool {
        matches!(self, SymbolId::Scatter)
    }

    pub fn is_high(&self) -> bool {
        matches!(self, SymbolId::High(_))
    }

    /// Ordinal is inside the category's range
    pub fn is_valid(&self) -> bool {
        match self {
            SymbolId::Low(i) => *i < LOW_COUNT,
            SymbolId::High(i) => *i < HIGH_COUNT,
            SymbolId::Wild | SymbolId::Scatter => true,
        }
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolId::Low(i) => write!(f, "L{}", i + 1),
            SymbolId::High(i) => write!(f, "H{}", i + 1),
            SymbolId::Wild => write!(f, "W"),
            SymbolId::Scatter => write!(f, "S"),
        }
    }
}

/// Unknown symbol label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown symbol label: {0}")]
pub struct ParseSymbolError(pub String);

impl FromStr for SymbolId {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let symbol = match label {
            "W" => SymbolId::Wild,
            "S" => SymbolId::Scatter,
            _ => {
                let mut chars = label.chars();
                let kind = chars.next();
                let n: u8 = chars
                    .as_str()
                    .parse()
                    .map_err(|_| ParseSymbolError(label.to_string()))?;
                if n == 0 {
                    return Err(ParseSymbolError(label.to_string()));
                }
                match kind {
                    Some('L') => SymbolId::Low(n - 1),
                    Some('H') => SymbolId::High(n - 1),
                    _ => return Err(ParseSymbolError(label.to_string())),
                }
            }
        };
        if symbol.is_valid() {
            Ok(symbol)
        } else {
            Err(ParseSymbolError(label.to_string()))
        }
    }
}

impl From<SymbolId> for String {
    fn from(symbol: SymbolId) -> Self {
        symbol.to_string()
    }
}

impl TryFrom<String> for SymbolId {
    type Error = ParseSymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for symbol in ALL_SYMBOLS {
            let label = symbol.to_string();
            assert_eq!(label.parse::<SymbolId>().unwrap(), symbol);
        }
    }

    #[test]
    fn test_out_of_range_labels_rejected() {
        assert!("L5".parse::<SymbolId>().is_err());
        assert!("H6".parse::<SymbolId>().is_err());
        assert!("L0".parse::<SymbolId>().is_err());
        assert!("X1".parse::<SymbolId>().is_err());
        assert!("".parse::<SymbolId>().is_err());
    }

    #[test]
    fn test_categories() {
        assert_eq!(SymbolId::Low(2).category(), SymbolCategory::Low);
        assert_eq!(SymbolId::High(4).ordinal(), 4);
        assert!(!SymbolId::Wild.is_paying());
        assert!(!SymbolId::Scatter.is_paying());
        assert!(PAYING_SYMBOLS.iter().all(|s| s.is_paying()));
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&vec![SymbolId::High(0), SymbolId::Wild]).unwrap();
        assert_eq!(json, r#"["H1","W"]"#);
        let back: Vec<SymbolId> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![SymbolId::High(0), SymbolId::Wild]);
    }
}
