//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::paytable::PayTable;
use crate::sampler::WeightTable;
use crate::spin::SpinMode;
use crate::symbols::SymbolId;

/// Default board width
pub const DEFAULT_COLS: usize = 6;
/// Default board height
pub const DEFAULT_ROWS: usize = 5;
/// Default cap on carried free spins
pub const DEFAULT_FS_TOTAL_CAP: u32 = 20;
/// Largest board `validate` accepts, in cells
pub const MAX_GRID_CELLS: usize = 1 << 16;

/// Default multiplier ladder
pub const DEFAULT_LADDER: [f64; 10] = [1.0, 2.0, 3.0, 5.0, 8.0, 12.0, 20.0, 30.0, 50.0, 100.0];

/// Payout calibration multipliers, applied to every cluster payout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtpScale {
    pub base: f64,
    pub free_spins: f64,
}

impl RtpScale {
    pub fn for_mode(&self, mode: SpinMode) -> f64 {
        match mode {
            SpinMode::Base => self.base,
            SpinMode::FreeSpins => self.free_spins,
        }
    }
}

impl Default for RtpScale {
    fn default() -> Self {
        Self {
            base: 1.0,
            free_spins: 1.0,
        }
    }
}

/// Enchanted wild: clusters holding enough wilds pay more
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnchantedWildConfig {
    pub enabled: bool,
    /// Wilds needed inside one cluster
    pub min_wilds: usize,
    /// Payout factor for a qualifying cluster
    pub boost: f64,
}

impl Default for EnchantedWildConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_wilds: 2,
            boost: 1.6,
        }
    }
}

/// Scatter infusion: a winning step on a board with exactly
/// `scatter_count` scatters reads the ladder `ladder_bump` rungs higher,
/// once per spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterInfusionConfig {
    pub enabled: bool,
    pub scatter_count: usize,
    pub ladder_bump: u32,
}

impl Default for ScatterInfusionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scatter_count: 2,
            ladder_bump: 1,
        }
    }
}

/// Aftershock wild: a dead board after a win gets one cell turned Wild
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AftershockConfig {
    pub enabled: bool,
    /// Injections allowed per spin
    pub budget: u32,
    /// Weight every eligible cell starts with
    pub base_weight: f64,
    /// Added per orthogonally adjacent high-pay symbol
    pub high_adjacent_weight: f64,
    /// Added per orthogonally adjacent wild
    pub wild_adjacent_weight: f64,
}

impl Default for AftershockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            budget: 1,
            base_weight: 1.0,
            high_adjacent_weight: 6.0,
            wild_adjacent_weight: 1.0,
        }
    }
}

/// Options recognised by [`build_sim_config`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimConfigArgs {
    /// Grid width
    pub cols: Option<usize>,
    /// Grid height
    pub rows: Option<usize>,
    /// Free-spin cap override
    pub fs_total_cap: Option<u32>,
}

/// Immutable simulation inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub cols: usize,
    pub rows: usize,
    /// Multiplier per ladder rung
    pub ladder: Vec<f64>,
    pub base_weights: WeightTable,
    pub free_spins_weights: WeightTable,
    /// Scatter weight factor applied to a local copy of the base table
    pub base_scatter_weight_mult: f64,
    pub paytable: PayTable,
    /// Upper bound on tumble iterations per spin
    pub max_tumbles: u32,
    /// Scatters needed to award free spins
    pub scatter_threshold: usize,
    /// Free spins awarded by a base-game trigger
    pub fs_award_base: u32,
    /// Free spins awarded by a retrigger inside free spins
    pub fs_award_fs: u32,
    /// Ceiling on carried free spins
    pub fs_total_cap: u32,
    /// Ceiling on a spin's total win (bet multiples)
    pub total_winx_cap: f64,
    pub enchanted_wild: EnchantedWildConfig,
    pub scatter_infusion: ScatterInfusionConfig,
    pub aftershock: AftershockConfig,
    pub rtp_scale: RtpScale,
}

/// Default base-game weights
pub fn default_base_weights() -> WeightTable {
    WeightTable::new(&[
        (SymbolId::Low(0), 22.0),
        (SymbolId::Low(1), 20.0),
        (SymbolId::Low(2), 18.0),
        (SymbolId::Low(3), 16.0),
        (SymbolId::High(0), 10.0),
        (SymbolId::High(1), 8.0),
        (SymbolId::High(2), 6.0),
        (SymbolId::High(3), 5.0),
        (SymbolId::High(4), 4.0),
        (SymbolId::Wild, 2.5),
        (SymbolId::Scatter, 1.6),
    ])
}

/// Default free-spins weights (richer in highs and wilds)
pub fn default_free_spins_weights() -> WeightTable {
    WeightTable::new(&[
        (SymbolId::Low(0), 20.0),
        (SymbolId::Low(1), 18.0),
        (SymbolId::Low(2), 16.0),
        (SymbolId::Low(3), 15.0),
        (SymbolId::High(0), 10.0),
        (SymbolId::High(1), 9.0),
        (SymbolId::High(2), 7.0),
        (SymbolId::High(3), 6.0),
        (SymbolId::High(4), 5.0),
        (SymbolId::Wild, 3.5),
        (SymbolId::Scatter, 1.2),
    ])
}

/// Assemble a config from the built-in tables and caps
pub fn build_sim_config(args: SimConfigArgs) -> SimConfig {
    SimConfig {
        cols: args.cols.unwrap_or(DEFAULT_COLS),
        rows: args.rows.unwrap_or(DEFAULT_ROWS),
        ladder: DEFAULT_LADDER.to_vec(),
        base_weights: default_base_weights(),
        free_spins_weights: default_free_spins_weights(),
        base_scatter_weight_mult: 1.0,
        paytable: PayTable::standard(),
        max_tumbles: 25,
        scatter_threshold: 3,
        fs_award_base: 10,
        fs_award_fs: 5,
        fs_total_cap: args.fs_total_cap.unwrap_or(DEFAULT_FS_TOTAL_CAP),
        total_winx_cap: 10_000.0,
        enchanted_wild: EnchantedWildConfig::default(),
        scatter_infusion: ScatterInfusionConfig::default(),
        aftershock: AftershockConfig::default(),
        rtp_scale: RtpScale::default(),
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        build_sim_config(SimConfigArgs::default())
    }
}

impl SimConfig {
    /// Set the payout calibration for both modes
    pub fn set_rtp_scale(&mut self, base: f64, free_spins: f64) {
        self.rtp_scale = RtpScale { base, free_spins };
    }

    pub fn with_rtp_scale(mut self, base: f64, free_spins: f64) -> Self {
        self.set_rtp_scale(base, free_spins);
        self
    }

    pub fn total_cells(&self) -> usize {
        self.cols * self.rows
    }

    /// Stored weight table for a mode
    pub fn weights_for(&self, mode: SpinMode) -> &WeightTable {
        match mode {
            SpinMode::Base => &self.base_weights,
            SpinMode::FreeSpins => &self.free_spins_weights,
        }
    }

    /// Local copy of a mode's weights with the base-game scatter nudge applied
    pub fn spin_weights(&self, mode: SpinMode) -> WeightTable {
        let mut weights = self.weights_for(mode).clone();
        if mode == SpinMode::Base && self.base_scatter_weight_mult != 1.0 {
            weights.scale(SymbolId::Scatter, self.base_scatter_weight_mult);
        }
        weights
    }

    /// Free spins a trigger awards in `mode`
    pub fn fs_award(&self, mode: SpinMode) -> u32 {
        match mode {
            SpinMode::Base => self.fs_award_base,
            SpinMode::FreeSpins => self.fs_award_fs,
        }
    }

    /// Multiplier at `index`, clamped to the last rung
    pub fn ladder_multiplier(&self, index: u32) -> f64 {
        let last = self.ladder.len().saturating_sub(1);
        let i = (index as usize).min(last);
        self.ladder.get(i).copied().unwrap_or(1.0)
    }

    /// Ladder index whose multiplier equals `start_multiplier`
    pub fn ladder_index_of(&self, start_multiplier: f64) -> SimResult<u32> {
        self.ladder
            .iter()
            .position(|&m| (m - start_multiplier).abs() < 1e-9)
            .map(|i| i as u32)
            .ok_or(SimError::LadderStartNotFound(start_multiplier))
    }

    pub fn validate(&self) -> SimResult<()> {
        let cells = self.cols.checked_mul(self.rows);
        if !matches!(cells, Some(1..=MAX_GRID_CELLS)) {
            return Err(SimError::InvalidGrid {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.ladder.is_empty() {
            return Err(SimError::EmptyLadder);
        }
        if let Some(bad) = self.ladder.iter().find(|m| !m.is_finite() || **m < 0.0) {
            return Err(SimError::InvalidLadder(format!("rung {bad} is not a valid multiplier")));
        }
        self.base_weights.validate(SpinMode::Base)?;
        self.free_spins_weights.validate(SpinMode::FreeSpins)?;
        self.paytable.validate()?;

        let factors = [
            ("base_scatter_weight_mult", self.base_scatter_weight_mult),
            ("total_winx_cap", self.total_winx_cap),
            ("enchanted_wild.boost", self.enchanted_wild.boost),
            ("aftershock.base_weight", self.aftershock.base_weight),
            ("aftershock.high_adjacent_weight", self.aftershock.high_adjacent_weight),
            ("aftershock.wild_adjacent_weight", self.aftershock.wild_adjacent_weight),
            ("rtp_scale.base", self.rtp_scale.base),
            ("rtp_scale.free_spins", self.rtp_scale.free_spins),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidParam(format!("{name} = {value}")));
            }
        }
        if self.scatter_threshold == 0 {
            return Err(SimError::InvalidParam("scatter_threshold must be at least 1".into()));
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn from_json_str(json: &str) -> SimResult<Self> {
        serde_json::from_str(json).map_err(|e| SimError::Config(format!("Invalid JSON config: {e}")))
    }

    pub fn from_yaml_str(yaml: &str) -> SimResult<Self> {
        serde_yml::from_str(yaml).map_err(|e| SimError::Config(format!("Invalid YAML config: {e}")))
    }

    /// Load a `.json`, `.yaml` or `.yml` file and validate it
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            other => {
                return Err(SimError::Config(format!(
                    "{}: unsupported config extension {other:?}",
                    path.display()
                )));
            }
        };
        config.validate()?;
        log::info!(
            "Loaded config {} ({}x{}, {} ladder rungs)",
            path.display(),
            config.cols,
            config.rows,
            config.ladder.len()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let cfg = build_sim_config(SimConfigArgs::default());
        assert_eq!((cfg.cols, cfg.rows), (6, 5));
        assert_eq!(cfg.fs_total_cap, 20);
        assert_eq!(cfg.max_tumbles, 25);
        assert_eq!(cfg.fs_award_base, 10);
        assert_eq!(cfg.fs_award_fs, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_build_overrides() {
        let cfg = build_sim_config(SimConfigArgs {
            cols: Some(7),
            rows: Some(7),
            fs_total_cap: Some(50),
        });
        assert_eq!(cfg.total_cells(), 49);
        assert_eq!(cfg.fs_total_cap, 50);
    }

    #[test]
    fn test_ladder_multiplier_clamps() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.ladder_multiplier(0), 1.0);
        assert_eq!(cfg.ladder_multiplier(3), 5.0);
        assert_eq!(cfg.ladder_multiplier(9), 100.0);
        assert_eq!(cfg.ladder_multiplier(500), 100.0);
    }

    #[test]
    fn test_ladder_index_of() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.ladder_index_of(1.0), Ok(0));
        assert_eq!(cfg.ladder_index_of(8.0), Ok(4));
        let err = cfg.ladder_index_of(7.0).unwrap_err();
        assert_eq!(err, SimError::LadderStartNotFound(7.0));
        assert_eq!(err.to_string(), "start multiplier 7 not found in ladder");
    }

    #[test]
    fn test_scatter_nudge_only_touches_local_base_copy() {
        let mut cfg = SimConfig::default();
        cfg.base_scatter_weight_mult = 2.0;
        let nudged = cfg.spin_weights(SpinMode::Base);
        assert_eq!(nudged.weight_of(SymbolId::Scatter), 3.2);
        assert_eq!(cfg.base_weights.weight_of(SymbolId::Scatter), 1.6);
        assert_eq!(
            cfg.spin_weights(SpinMode::FreeSpins),
            cfg.free_spins_weights
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = SimConfig::default();
        cfg.ladder.clear();
        assert_eq!(cfg.validate(), Err(SimError::EmptyLadder));

        let mut cfg = SimConfig::default();
        cfg.rows = 0;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidGrid { .. })));

        let cfg = SimConfig::default().with_rtp_scale(f64::NAN, 1.0);
        assert!(matches!(cfg.validate(), Err(SimError::InvalidParam(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        let mut cfg = SimConfig::default();
        cfg.cols = usize::MAX / 2 + 1;
        cfg.rows = 2;
        assert_eq!(
            cfg.validate(),
            Err(SimError::InvalidGrid {
                cols: usize::MAX / 2 + 1,
                rows: 2
            })
        );

        let mut cfg = SimConfig::default();
        cfg.cols = MAX_GRID_CELLS + 1;
        cfg.rows = 1;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidGrid { .. })));

        cfg.cols = MAX_GRID_CELLS;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let cfg = SimConfig::default().with_rtp_scale(0.97, 0.93);
        let back = SimConfig::from_json_str(&cfg.to_json()).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let cfg = SimConfig::from_yaml_str("cols: 7\nrtp_scale:\n  base: 0.9\n").unwrap();
        assert_eq!(cfg.cols, 7);
        assert_eq!(cfg.rows, 5);
        assert_eq!(cfg.rtp_scale.base, 0.9);
        assert_eq!(cfg.rtp_scale.free_spins, 1.0);
        assert_eq!(cfg.ladder, DEFAULT_LADDER.to_vec());
    }
}
