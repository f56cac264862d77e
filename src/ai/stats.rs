//! Move search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one move search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Legal placements generated.
    pub candidates: u32,

    /// Resulting positions scored by the heuristic.
    pub positions_evaluated: u32,

    /// Opponent replies simulated (hard only).
    pub replies_examined: u32,

    /// The soft time budget cut the shortlist short.
    pub budget_exhausted: bool,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Heuristic evaluations per second.
    #[must_use]
    pub fn evaluations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.positions_evaluated) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
