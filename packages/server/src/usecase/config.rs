use std::time::Duration;

use crate::domain::AdvanceDelay;

/// Delays before the session advances to the next round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// After bidding ended with no bid
    pub no_bid_delay: Duration,
    /// After a sale or a liar call was resolved
    pub result_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            no_bid_delay: Duration::from_secs(3),
            result_delay: Duration::from_secs(5),
        }
    }
}

impl SessionConfig {
    pub fn delay_for(&self, delay: AdvanceDelay) -> Duration {
        match delay {
            AdvanceDelay::NoBid => self.no_bid_delay,
            AdvanceDelay::Result => self.result_delay,
        }
    }
}
