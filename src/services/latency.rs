//! Simulated backing-store latency.
//!
//! Every backing-store read is preceded by a random non-blocking sleep so the
//! benefit of the cache is visible in demo environments.

use rand::Rng;
use std::time::Duration;

use crate::domain::models::SimulationConfig;

/// Random delay applied before each backing-store read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelaySimulator {
    min_ms: u64,
    max_ms: u64,
}

impl DelaySimulator {
    /// Delay drawn uniformly from `[min_ms, max_ms)`. When `max_ms <= min_ms`
    /// the delay is always `min_ms`.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// No delay at all.
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.min_delay_ms, config.max_delay_ms)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn next_delay(&self) -> Duration {
        let ms = if self.max_ms > self.min_ms {
            rand::rng().random_range(self.min_ms..self.max_ms)
        } else {
            self.min_ms
        };
        Duration::from_millis(ms)
    }

    /// Suspend the current task for one simulated round trip.
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for DelaySimulator {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
