//! Display refresh control for elapsed-time streams

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often a consumer wants elapsed-time updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum RefreshRate {
    /// Every tick of the ticker
    #[default]
    Native,

    /// At most this many updates per second.
    /// A rate at or above the tick rate is the same as Native.
    Max(u32),
}

impl RefreshRate {
    /// Normalize against the ticker's frequency.
    pub fn normalize(self, tick_hz: f64) -> Self {
        match self {
            RefreshRate::Native => RefreshRate::Native,
            RefreshRate::Max(0) => RefreshRate::Native,
            RefreshRate::Max(hz) if hz as f64 >= tick_hz => RefreshRate::Native,
            RefreshRate::Max(hz) => RefreshRate::Max(hz),
        }
    }

    /// Minimum spacing between updates, if throttling applies.
    pub fn throttle_interval(self, tick_hz: f64) -> Option<Duration> {
        match self.normalize(tick_hz) {
            RefreshRate::Native => None,
            RefreshRate::Max(hz) => Some(Duration::from_secs_f64(1.0 / hz as f64)),
        }
    }
}
