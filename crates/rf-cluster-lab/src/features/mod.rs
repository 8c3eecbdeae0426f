//! Win-modifying sub-features and the free-spin trigger tracker
//!
//! Applied by the spin orchestrator once per tumble iteration, in order:
//!
//! ```text
//! clusters found
//!     │
//!     ├── EnchantedWild   (payout boost for wild-rich clusters)
//!     ├── RTP scale       (calibration multiplier per mode)
//!     └── ScatterInfusion (one-off ladder bump for this step)
//!
//! no clusters
//!     └── Aftershock      (one cell turned Wild, then re-evaluate)
//!
//! after tumble
//!     └── ScatterTracker  (free spins on threshold crossing)
//! ```

mod aftershock;
mod enchanted;
mod infusion;
mod scatter;

pub use aftershock::*;
pub use enchanted::*;
pub use infusion::*;
pub use scatter::*;
