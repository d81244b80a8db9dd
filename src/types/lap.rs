//! Lap marks captured while the stopwatch runs

use serde::{Deserialize, Serialize};

/// A single lap mark.
///
/// `time` is cumulative since the run started; `split_time` is the time since
/// the previous mark (or since the start for lap 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct Lap {
    /// 1-based lap number
    pub number: u32,
    /// Elapsed milliseconds at capture
    pub time: u64,
    /// Milliseconds since the previous mark
    pub split_time: u64,
}

impl Lap {
    pub fn new(number: u32, time: u64, split_time: u64) -> Self {
        Self { number, time, split_time }
    }
}
