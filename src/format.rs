//! Display formatting for stopwatch values and wall-clock time

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// 12- or 24-hour wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

/// Format milliseconds as "MM:SS.cs" (centiseconds). Minutes do not wrap.
pub fn format_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let centis = (ms % 1_000) / 10;
    format!("{:02}:{:02}.{:02}", minutes, seconds, centis)
}

/// Format an improvement delta.
///
/// Improvements (positive deltas) read as time taken off, "-MM:SS.cs";
/// regressions as time added, "+MM:SS.cs".
pub fn format_improvement(delta: i64) -> String {
    let magnitude = format_time(delta.unsigned_abs());
    match delta.signum() {
        1 => format!("-{}", magnitude),
        -1 => format!("+{}", magnitude),
        _ => magnitude,
    }
}

/// Format a wall-clock time of day.
pub fn format_wall_clock<Tz>(time: &DateTime<Tz>, format: ClockFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match format {
        ClockFormat::TwentyFourHour => time.format("%H:%M:%S").to_string(),
        ClockFormat::TwelveHour => time.format("%I:%M:%S %p").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00.00");
        assert_eq!(format_time(12_340), "00:12.34");
        assert_eq!(format_time(61_005), "01:01.00");
        assert_eq!(format_time(3_725_990), "62:05.99");
    }

    #[test]
    fn test_format_improvement() {
        assert_eq!(format_improvement(1_500), "-00:01.50");
        assert_eq!(format_improvement(-500), "+00:00.50");
        assert_eq!(format_improvement(0), "00:00.00");
    }

    #[test]
    fn test_format_wall_clock() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 15, 4, 5).unwrap();
        assert_eq!(format_wall_clock(&time, ClockFormat::TwentyFourHour), "15:04:05");
        assert_eq!(format_wall_clock(&time, ClockFormat::TwelveHour), "03:04:05 PM");
    }
}
