//! Committed time records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Distance, Lap, Stroke};
use crate::timestamp::{deserialize_date, missing_date};

/// One committed stopwatch run.
///
/// Records are append-only: a correction is a new record, never an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct TimeRecord {
    pub id: String,
    /// Total elapsed milliseconds at commit
    pub time: u64,
    #[serde(deserialize_with = "deserialize_date", default = "missing_date")]
    pub date: DateTime<Utc>,
    pub stroke: Stroke,
    pub distance: Distance,
    #[serde(default)]
    pub laps: Vec<Lap>,
}

impl TimeRecord {
    /// Whether this record belongs to the given event.
    pub fn is_event(&self, stroke: Stroke, distance: Distance) -> bool {
        self.stroke == stroke && self.distance == distance
    }
}
