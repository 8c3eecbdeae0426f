//! Scatter infusion ladder bump

use crate::config::ScatterInfusionConfig;

/// Once-per-spin ladder bump, owned by a single spin's fold state
#[derive(Debug, Clone, Copy)]
pub struct ScatterInfusion {
    config: ScatterInfusionConfig,
    available: bool,
}

impl ScatterInfusion {
    pub fn new(config: &ScatterInfusionConfig) -> Self {
        Self {
            config: *config,
            available: config.enabled,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Ladder index to read for this step, and whether the bump fired.
    ///
    /// Fires when the step has a win and the board entering the step shows
    /// exactly the configured scatter count. The persisted index is untouched.
    pub fn effective_ladder_index(
        &mut self,
        ladder_index: u32,
        has_win: bool,
        scatter_count: usize,
    ) -> (u32, bool) {
        if self.available && has_win && scatter_count == self.config.scatter_count {
            self.available = false;
            (ladder_index.saturating_add(self.config.ladder_bump), true)
        } else {
            (ladder_index, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_spin() {
        let mut infusion = ScatterInfusion::new(&ScatterInfusionConfig::default());
        assert_eq!(infusion.effective_ladder_index(3, true, 2), (4, true));
        assert!(!infusion.is_available());
        assert_eq!(infusion.effective_ladder_index(4, true, 2), (4, false));
    }

    #[test]
    fn test_needs_win_and_exact_count() {
        let mut infusion = ScatterInfusion::new(&ScatterInfusionConfig::default());
        assert_eq!(infusion.effective_ladder_index(0, false, 2), (0, false));
        assert_eq!(infusion.effective_ladder_index(0, true, 3), (0, false));
        assert_eq!(infusion.effective_ladder_index(0, true, 1), (0, false));
        assert!(infusion.is_available());
    }

    #[test]
    fn test_disabled_never_fires() {
        let config = ScatterInfusionConfig {
            enabled: false,
            ..Default::default()
        };
        let mut infusion = ScatterInfusion::new(&config);
        assert_eq!(infusion.effective_ladder_index(0, true, 2), (0, false));
    }
}
