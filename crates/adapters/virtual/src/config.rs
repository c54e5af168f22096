//! Virtual house configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the virtual house.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VirtualConfig {
    /// Display names of the dimmer loads to create.
    pub loads: Vec<String>,
    /// How long after `initialize()` the loads become visible, in milliseconds.
    ///
    /// Real controllers take a moment to report their loads; a non-zero delay
    /// exercises the daemon's startup polling.
    pub discovery_delay_ms: u64,
    /// Interval between simulated motion signals on every load, in seconds.
    ///
    /// `0` disables motion simulation.
    pub motion_interval_secs: u64,
    /// Intensity reported by simulated motion signals.
    pub motion_intensity: u16,
}

impl VirtualConfig {
    #[must_use]
    pub fn discovery_delay(&self) -> Duration {
        Duration::from_millis(self.discovery_delay_ms)
    }

    /// `None` when motion simulation is disabled.
    #[must_use]
    pub fn motion_interval(&self) -> Option<Duration> {
        (self.motion_interval_secs > 0).then(|| Duration::from_secs(self.motion_interval_secs))
    }
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self {
            loads: vec!["Nook".to_string()],
            discovery_delay_ms: 0,
            motion_interval_secs: 0,
            motion_intensity: 50,
        }
    }
}
