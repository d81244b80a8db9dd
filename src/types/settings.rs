//! Club-wide settings document

use serde::{Deserialize, Serialize};

pub const DEFAULT_CLUB_NAME: &str = "Swim Club";

/// Club branding shown on the timing screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ClubSettings {
    pub name: String,
    pub logo_url: Option<String>,
}

impl Default for ClubSettings {
    fn default() -> Self {
        Self { name: DEFAULT_CLUB_NAME.to_string(), logo_url: None }
    }
}
