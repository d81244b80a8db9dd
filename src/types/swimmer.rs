//! Swimmer documents and their partial updates

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TimeRecord;

/// Best split per lap number, in milliseconds.
pub type BestLapTimes = BTreeMap<u32, u64>;

/// A swimmer as stored in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct Swimmer {
    pub id: String,
    pub name: String,
    /// Records in append order (not necessarily chronological)
    #[serde(default)]
    pub times: Vec<TimeRecord>,
    /// Derived cache of the minimum split per lap number over `times`
    #[serde(default)]
    pub best_lap_times: BestLapTimes,
}

impl Swimmer {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: SwimmerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(times) = patch.times {
            self.times = times;
        }
        if let Some(best_lap_times) = patch.best_lap_times {
            self.best_lap_times = best_lap_times;
        }
    }
}

/// Fields for a swimmer that does not have an id yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct NewSwimmer {
    pub name: String,
    #[serde(default)]
    pub times: Vec<TimeRecord>,
    #[serde(default)]
    pub best_lap_times: BestLapTimes,
}

impl NewSwimmer {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Attach the id assigned by the store.
    pub fn with_id(self, id: impl Into<String>) -> Swimmer {
        Swimmer {
            id: id.into(),
            name: self.name,
            times: self.times,
            best_lap_times: self.best_lap_times,
        }
    }
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SwimmerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<TimeRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_lap_times: Option<BestLapTimes>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_shape_round_trips_through_store_json() {
        let json = r#"{
            "id": "abc",
            "name": "Ada",
            "times": [{
                "id": "r1",
                "time": 31250,
                "date": {"seconds": 1704067200, "nanoseconds": 0},
                "stroke": "Freestyle",
                "distance": "50m",
                "laps": [{"number": 1, "time": 15000, "splitTime": 15000}]
            }],
            "bestLapTimes": {"1": 15000}
        }"#;

        let swimmer: Swimmer = serde_json::from_str(json).unwrap();
        assert_eq!(swimmer.times.len(), 1);
        assert_eq!(swimmer.times[0].date.timestamp(), 1_704_067_200);
        assert_eq!(swimmer.times[0].laps[0].split_time, 15_000);
        assert_eq!(swimmer.best_lap_times.get(&1), Some(&15_000));

        let written = serde_json::to_value(&swimmer).unwrap();
        assert_eq!(written["bestLapTimes"]["1"], 15_000);
        assert!(written["times"][0]["date"].as_str().unwrap().starts_with("2024-01-01T00:00:00"));
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let swimmer: Swimmer = serde_json::from_str(r#"{"id": "x", "name": "Bo"}"#).unwrap();
        assert!(swimmer.times.is_empty());
        assert!(swimmer.best_lap_times.is_empty());
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut swimmer = NewSwimmer::named("Cy").with_id("s1");
        swimmer.apply(SwimmerPatch {
            best_lap_times: Some(BTreeMap::from([(1, 900)])),
            ..SwimmerPatch::default()
        });
        assert_eq!(swimmer.name, "Cy");
        assert_eq!(swimmer.best_lap_times.get(&1), Some(&900));
    }
}
