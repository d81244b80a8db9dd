//! Test utilities for building rosters and histories
//!
//! This module provides fixture builders shared by unit tests, the integration
//! tests and the benchmarks, so that every suite describes swimmers the same
//! way.

#![cfg(any(test, feature = "benchmark"))]

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::timestamp::parse_date_text;
use crate::types::{Distance, Lap, NewSwimmer, Stroke, Swimmer, TimeRecord};

/// Build a lap list from split times.
///
/// Lap numbers start at 1 and cumulative times are the running sum of the
/// splits, the same shape the timer engine produces.
pub fn laps_from_splits(splits: &[u64]) -> Vec<Lap> {
    let mut total = 0;
    splits
        .iter()
        .enumerate()
        .map(|(index, &split)| {
            total += split;
            Lap::new(index as u32 + 1, total, split)
        })
        .collect()
}

/// Parse a fixture date, accepting `YYYY-MM-DD` or RFC 3339.
///
/// # Panics
///
/// Panics on an unparseable date; fixture dates are literals.
pub fn date(text: &str) -> DateTime<Utc> {
    parse_date_text(text).unwrap_or_else(|| panic!("fixture date '{}' does not parse", text))
}

/// Build a record with a stable id derived from its contents.
pub fn record(
    time: u64,
    stroke: Stroke,
    distance: Distance,
    date_text: &str,
    splits: &[u64],
) -> TimeRecord {
    TimeRecord {
        id: format!("{}-{}-{}-{}", stroke, distance, date_text, time),
        time,
        date: date(date_text),
        stroke,
        distance,
        laps: laps_from_splits(splits),
    }
}

/// Build a swimmer with the given history and a consistent best-lap cache.
pub fn swimmer_with_history(id: &str, name: &str, times: Vec<TimeRecord>) -> Swimmer {
    let best_lap_times = crate::personal_best::rebuild_bests(&times);
    NewSwimmer { name: name.to_string(), times, best_lap_times }.with_id(id)
}

/// Generate a deterministic history of `count` records.
///
/// Records cycle through every stroke and distance, are spaced a day apart,
/// and are emitted out of date order so that sorting does real work.
pub fn synthetic_history(count: usize) -> Vec<TimeRecord> {
    let epoch = Utc.with_ymd_and_hms(2023, 1, 1, 8, 0, 0).single().unwrap_or_default();

    (0..count)
        .map(|i| {
            let stroke = Stroke::ALL[i % Stroke::ALL.len()];
            let distance = Distance::ALL[(i / Stroke::ALL.len()) % Distance::ALL.len()];
            let lap_count = (distance.meters() / 25).max(1) as usize;
            let split = 14_000 + ((i * 7_919) % 3_000) as u64;
            let splits = vec![split; lap_count];
            // reverse-interleaved day offsets
            let day = ((count - i) * 37 % count.max(1)) as i64;

            TimeRecord {
                id: format!("synthetic-{}", i),
                time: split * lap_count as u64,
                date: epoch + Duration::days(day),
                stroke,
                distance,
                laps: laps_from_splits(&splits),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_laps_from_splits_accumulates() {
        let laps = laps_from_splits(&[100, 250, 50]);
        assert_eq!(laps, vec![Lap::new(1, 100, 100), Lap::new(2, 350, 250), Lap::new(3, 400, 50)]);
    }

    #[test]
    fn test_swimmer_fixture_has_consistent_cache() {
        let swimmer = swimmer_with_history(
            "s1",
            "Ada",
            vec![record(30_000, Stroke::Freestyle, Distance::M50, "2024-01-01", &[14_000, 16_000])],
        );
        assert_eq!(swimmer.best_lap_times.get(&2), Some(&16_000));
    }

    #[test]
    fn test_synthetic_history_is_deterministic() {
        assert_eq!(synthetic_history(50), synthetic_history(50));
        assert_eq!(synthetic_history(50).len(), 50);
    }
}
