//! Engine parameters for phase engine control.
//!
//! These are application-layer concerns, not game rules: how long a seat
//! may think, how fast phases advance, and whether randomness is seeded.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Phase engine control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Upper bound on a single `ask`; exceeding it counts as no action.
    pub decision_timeout: Duration,
    /// Cosmetic pause after each phase boundary.
    pub phase_delay: Duration,
    /// Days after which an unfinished match is abandoned.
    pub max_days: u32,
    /// Seed for role shuffles and tie-breaks. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            decision_timeout: Duration::from_secs(60),
            phase_delay: Duration::ZERO,
            max_days: 20,
            seed: None,
        }
    }
}

impl EngineParams {
    // ==================== Builder Methods ====================

    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }

    pub fn with_phase_delay(mut self, delay: Duration) -> Self {
        self.phase_delay = delay;
        self
    }

    pub fn with_max_days(mut self, days: u32) -> Self {
        self.max_days = days;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
