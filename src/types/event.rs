//! Swim event classification: stroke and distance

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ClubError;

/// Stroke swum in a timed run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Stroke {
    #[default]
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    #[serde(rename = "Individual Medley")]
    IndividualMedley,
}

impl Stroke {
    /// All strokes in display order.
    pub const ALL: [Stroke; 5] = [
        Stroke::Freestyle,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
        Stroke::IndividualMedley,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::Butterfly => "Butterfly",
            Stroke::IndividualMedley => "Individual Medley",
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stroke {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stroke::ALL
            .into_iter()
            .find(|stroke| stroke.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClubError::Parse {
                context: "stroke".to_string(),
                details: format!("unknown stroke '{}'", s),
            })
    }
}

/// Pool distance of a timed run.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum Distance {
    #[serde(rename = "25m")]
    M25,
    #[default]
    #[serde(rename = "50m")]
    M50,
    #[serde(rename = "100m")]
    M100,
    #[serde(rename = "200m")]
    M200,
    #[serde(rename = "400m")]
    M400,
    #[serde(rename = "800m")]
    M800,
    #[serde(rename = "1500m")]
    M1500,
}

impl Distance {
    /// All distances, shortest first.
    pub const ALL: [Distance; 7] = [
        Distance::M25,
        Distance::M50,
        Distance::M100,
        Distance::M200,
        Distance::M400,
        Distance::M800,
        Distance::M1500,
    ];

    pub fn meters(self) -> u32 {
        match self {
            Distance::M25 => 25,
            Distance::M50 => 50,
            Distance::M100 => 100,
            Distance::M200 => 200,
            Distance::M400 => 400,
            Distance::M800 => 800,
            Distance::M1500 => 1500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Distance::M25 => "25m",
            Distance::M50 => "50m",
            Distance::M100 => "100m",
            Distance::M200 => "200m",
            Distance::M400 => "400m",
            Distance::M800 => "800m",
            Distance::M1500 => "1500m",
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distance {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['m', 'M']);
        let meters: u32 = trimmed.parse().map_err(|_| ClubError::Parse {
            context: "distance".to_string(),
            details: format!("'{}' is not a distance", s),
        })?;

        Distance::ALL.into_iter().find(|d| d.meters() == meters).ok_or_else(|| ClubError::Parse {
            context: "distance".to_string(),
            details: format!("{}m is not a pool distance", meters),
        })
    }
}
