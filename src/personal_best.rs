//! Per-lap personal bests
//!
//! A swimmer's best-lap map holds the fastest split ever recorded at each lap
//! number. It is a cache over the swimmer's full history: commits merge the
//! new run into it incrementally, and [`rebuild_bests`] recomputes it from
//! scratch when the history is the thing to trust (imports, repairs).

use serde::{Deserialize, Serialize};

use crate::types::{BestLapTimes, Lap, TimeRecord};

/// How a split compares with the stored best for its lap number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "lowercase")]
pub enum LapComparison {
    Faster,
    Slower,
    /// Equal to the best, or no best recorded yet
    Neutral,
}

/// Classify a split against the best for its lap number.
pub fn classify(best: &BestLapTimes, lap_number: u32, split_time: u64) -> LapComparison {
    match best.get(&lap_number) {
        None => LapComparison::Neutral,
        Some(&best) if split_time < best => LapComparison::Faster,
        Some(&best) if split_time > best => LapComparison::Slower,
        Some(_) => LapComparison::Neutral,
    }
}

/// Fold a run's laps into a best map, returning the updated copy.
///
/// An entry is replaced when it is missing or strictly slower than the lap's
/// split. The input map is left as is.
pub fn merge_bests(best: &BestLapTimes, laps: &[Lap]) -> BestLapTimes {
    let mut merged = best.clone();
    for lap in laps {
        merged
            .entry(lap.number)
            .and_modify(|current| *current = (*current).min(lap.split_time))
            .or_insert(lap.split_time);
    }
    merged
}

/// Recompute a best map from a full history.
pub fn rebuild_bests(times: &[TimeRecord]) -> BestLapTimes {
    times.iter().fold(BestLapTimes::new(), |best, record| merge_bests(&best, &record.laps))
}

/// A lap paired with its comparison against the stored best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapStanding {
    pub lap: Lap,
    pub comparison: LapComparison,
    /// Best split at this lap number before the run, if any
    pub best: Option<u64>,
}

/// Classify every lap of a run for display.
pub fn compare_laps(best: &BestLapTimes, laps: &[Lap]) -> Vec<LapStanding> {
    laps.iter()
        .map(|lap| LapStanding {
            lap: *lap,
            comparison: classify(best, lap.number, lap.split_time),
            best: best.get(&lap.number).copied(),
        })
        .collect()
}
