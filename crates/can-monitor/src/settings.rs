//! Monitor loop settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable prefix for monitor overrides
pub const ENV_PREFIX: &str = "CANMON";

/// Timing of the simulated interrupt and the polling consumer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Consumer poll period (milliseconds)
    pub poll_interval_ms: u64,
    /// Gap between simulated receive interrupts (microseconds)
    pub interrupt_interval_us: u64,
    /// Frames of demo traffic to put on the mock bus
    pub demo_frames: usize,
    /// Identifier the acknowledgement frame is sent to
    pub ack_id: u32,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 20,
            interrupt_interval_us: 500,
            demo_frames: 32,
            ack_id: 0x7FF,
        }
    }
}

impl MonitorSettings {
    /// Defaults overlaid by `CANMON_*` variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn interrupt_interval(&self) -> Duration {
        Duration::from_micros(self.interrupt_interval_us)
    }
}
