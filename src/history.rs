//! Queries over a swimmer's recorded times
//!
//! All functions here are total: empty input yields empty output or `None`.
//! A record's event is its `(stroke, distance)` pair; best times, timelines
//! and personal-best flags are computed per event.

use crate::types::{Distance, Stroke, TimeRecord};

/// Fastest time among records matching the given filters.
///
/// An omitted filter matches every record.
pub fn best_time(
    times: &[TimeRecord],
    stroke: Option<Stroke>,
    distance: Option<Distance>,
) -> Option<u64> {
    times
        .iter()
        .filter(|r| stroke.is_none_or(|s| r.stroke == s))
        .filter(|r| distance.is_none_or(|d| r.distance == d))
        .map(|r| r.time)
        .min()
}

/// Records for one event in ascending date order.
///
/// The sort is stable: records sharing a date keep their append order.
pub fn chronological(
    times: &[TimeRecord],
    stroke: Stroke,
    distance: Distance,
) -> Vec<&TimeRecord> {
    let mut matching: Vec<&TimeRecord> =
        times.iter().filter(|r| r.is_event(stroke, distance)).collect();
    matching.sort_by_key(|r| r.date);
    matching
}

/// Change from each record to the next, in milliseconds.
///
/// Positive values are improvements, negative values regressions. The first
/// record has nothing to compare against.
pub fn improvements(ordered: &[&TimeRecord]) -> Vec<Option<i64>> {
    let mut deltas = Vec::with_capacity(ordered.len());
    deltas.extend(ordered.first().map(|_| None));
    deltas.extend(ordered.windows(2).map(|pair| Some(pair[0].time as i64 - pair[1].time as i64)));
    deltas
}

/// Whether `record` is (one of) the fastest for its event.
///
/// Ties all count as personal bests.
pub fn is_personal_best(record: &TimeRecord, times: &[TimeRecord]) -> bool {
    best_time(times, Some(record.stroke), Some(record.distance)) == Some(record.time)
}

/// One row of an event's progress timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntry<'a> {
    pub record: &'a TimeRecord,
    /// `None` for the first record of the event
    pub improvement: Option<i64>,
    pub personal_best: bool,
}

/// Chronological records of one event with deltas and PB flags.
pub fn timeline(
    times: &[TimeRecord],
    stroke: Stroke,
    distance: Distance,
) -> Vec<TimelineEntry<'_>> {
    let ordered = chronological(times, stroke, distance);
    let Some(best) = ordered.iter().map(|r| r.time).min() else {
        return Vec::new();
    };

    let deltas = improvements(&ordered);
    deltas
        .into_iter()
        .zip(ordered)
        .map(|(improvement, record)| TimelineEntry {
            record,
            improvement,
            personal_best: record.time == best,
        })
        .collect()
}

/// Best time per stroke at one distance, in stroke display order.
///
/// Strokes without a record at this distance are left out.
pub fn best_by_stroke(times: &[TimeRecord], distance: Distance) -> Vec<(Stroke, u64)> {
    Stroke::ALL
        .into_iter()
        .filter_map(|stroke| best_time(times, Some(stroke), Some(distance)).map(|t| (stroke, t)))
        .collect()
}

/// Most recent records of one event, newest first.
pub fn recent(
    times: &[TimeRecord],
    stroke: Stroke,
    distance: Distance,
    limit: usize,
) -> Vec<&TimeRecord> {
    let mut ordered = chronological(times, stroke, distance);
    ordered.reverse();
    ordered.truncate(limit);
    ordered
}

/// Events that have at least one record, in stroke then distance order.
pub fn events(times: &[TimeRecord]) -> Vec<(Stroke, Distance)> {
    let mut events: Vec<(Stroke, Distance)> =
        times.iter().map(|r| (r.stroke, r.distance)).collect();
    events.sort();
    events.dedup();
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;

    fn freestyle_50(time: u64, date: &str) -> TimeRecord {
        record(time, Stroke::Freestyle, Distance::M50, date, &[])
    }

    #[test]
    fn test_best_time_filters() {
        let times = vec![
            freestyle_50(100, "2024-01-01"),
            freestyle_50(90, "2024-01-02"),
            record(80, Stroke::Backstroke, Distance::M50, "2024-01-03", &[]),
        ];

        assert_eq!(best_time(&times, Some(Stroke::Freestyle), Some(Distance::M50)), Some(90));
        assert_eq!(best_time(&times, None, Some(Distance::M50)), Some(80));
        assert_eq!(best_time(&times, None, None), Some(80));
        assert_eq!(best_time(&times, Some(Stroke::Butterfly), None), None);
        assert_eq!(best_time(&[], None, None), None);
    }

    #[test]
    fn test_chronological_sorts_by_date() {
        let times = vec![
            freestyle_50(100, "2024-01-02"),
            freestyle_50(90, "2024-01-01"),
            record(1, Stroke::Backstroke, Distance::M50, "2023-01-01", &[]),
            freestyle_50(95, "2024-01-03"),
        ];

        let ordered: Vec<u64> = chronological(&times, Stroke::Freestyle, Distance::M50)
            .iter()
            .map(|r| r.time)
            .collect();
        assert_eq!(ordered, vec![90, 100, 95]);
    }

    #[test]
    fn test_chronological_is_stable_on_equal_dates() {
        let mut first = freestyle_50(100, "2024-01-01");
        first.id = "first".into();
        let mut second = freestyle_50(100, "2024-01-01");
        second.id = "second".into();
        let times = vec![first, second];

        let ids: Vec<&str> = chronological(&times, Stroke::Freestyle, Distance::M50)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_improvements() {
        let times = vec![
            freestyle_50(100, "2024-01-01"),
            freestyle_50(90, "2024-01-02"),
            freestyle_50(95, "2024-01-03"),
        ];
        let ordered = chronological(&times, Stroke::Freestyle, Distance::M50);

        assert_eq!(improvements(&ordered), vec![None, Some(10), Some(-5)]);
        assert!(improvements(&[]).is_empty());
    }

    #[test]
    fn test_personal_best_ties_all_count() {
        let times = vec![
            freestyle_50(90, "2024-01-01"),
            freestyle_50(90, "2024-01-02"),
            freestyle_50(95, "2024-01-03"),
            record(50, Stroke::Freestyle, Distance::M25, "2024-01-04", &[]),
        ];

        let flags: Vec<bool> = times.iter().map(|r| is_personal_best(r, &times)).collect();
        assert_eq!(flags, vec![true, true, false, true]);
    }

    #[test]
    fn test_timeline_rows() {
        let times = vec![
            freestyle_50(95, "2024-01-03"),
            freestyle_50(100, "2024-01-01"),
            freestyle_50(90, "2024-01-02"),
        ];

        let rows = timeline(&times, Stroke::Freestyle, Distance::M50);
        let summary: Vec<(u64, Option<i64>, bool)> =
            rows.iter().map(|row| (row.record.time, row.improvement, row.personal_best)).collect();

        assert_eq!(summary, vec![(100, None, false), (90, Some(10), true), (95, Some(-5), false)]);
        assert!(timeline(&times, Stroke::Butterfly, Distance::M50).is_empty());
    }

    #[test]
    fn test_best_by_stroke_and_recent() {
        let times = vec![
            record(40, Stroke::Butterfly, Distance::M50, "2024-01-01", &[]),
            freestyle_50(35, "2024-01-02"),
            freestyle_50(33, "2024-01-05"),
            freestyle_50(34, "2024-01-03"),
            record(20, Stroke::Freestyle, Distance::M25, "2024-01-04", &[]),
        ];

        assert_eq!(
            best_by_stroke(&times, Distance::M50),
            vec![(Stroke::Freestyle, 33), (Stroke::Butterfly, 40)]
        );

        let latest: Vec<u64> =
            recent(&times, Stroke::Freestyle, Distance::M50, 2).iter().map(|r| r.time).collect();
        assert_eq!(latest, vec![33, 34]);

        assert_eq!(
            events(&times),
            vec![
                (Stroke::Freestyle, Distance::M25),
                (Stroke::Freestyle, Distance::M50),
                (Stroke::Butterfly, Distance::M50)
            ]
        );
    }
}
