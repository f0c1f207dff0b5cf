use serde::{Deserialize, Serialize};

use super::TrickId;

/// Attempt and land counts for one trick, usually over a recency window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickStats {
    pub trick_id: TrickId,
    pub attempts: u32,
    pub lands: u32,
}

impl TrickStats {
    pub fn new(trick_id: TrickId) -> Self {
        Self {
            trick_id,
            ..Default::default()
        }
    }

    pub fn record(&mut self, landed: bool) {
        self.attempts += 1;
        if landed {
            self.lands += 1;
        }
    }

    /// Fraction of attempts landed, 0.0 when never attempted.
    pub fn landing_rate(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        f64::from(self.lands) / f64::from(self.attempts)
    }
}
