//! Session configuration
//!
//! Hosts configure a timing session from YAML. Every key is optional:
//!
//! ```yaml
//! tick_interval_ms: 10
//! default_stroke: Freestyle
//! default_distance: 50m
//! clock_format: 24h
//! display_hz: 30
//! log_filter: poolside=info
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::format::ClockFormat;
use crate::types::{Distance, RefreshRate, Stroke};
use crate::{ClubError, Result};

const MAX_TICK_INTERVAL_MS: u64 = 1_000;

/// Settings for a [`TimingSession`](crate::session::TimingSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Ticker period in milliseconds
    pub tick_interval_ms: u64,
    /// Stroke selected when the session opens
    pub default_stroke: Stroke,
    /// Distance selected when the session opens
    pub default_distance: Distance,
    pub clock_format: ClockFormat,
    /// Cap on elapsed-time updates per second for displays; unset means every tick
    pub display_hz: Option<u32>,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            default_stroke: Stroke::default(),
            default_distance: Distance::default(),
            clock_format: ClockFormat::default(),
            display_hz: None,
            log_filter: "poolside=info".to_string(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate YAML configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document means all defaults
        let config: Self =
            if yaml.trim().is_empty() { Self::default() } else { serde_yaml_ng::from_str(yaml)? };
        config.validate()?;
        debug!(?config, "Loaded session configuration");
        Ok(config)
    }

    /// Read, parse and validate a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| ClubError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 || self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(ClubError::config(format!(
                "tick_interval_ms must be between 1 and {}, got {}",
                MAX_TICK_INTERVAL_MS, self.tick_interval_ms
            )));
        }
        if self.display_hz == Some(0) {
            return Err(ClubError::config("display_hz must be positive when set"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn display_rate(&self) -> RefreshRate {
        self.display_hz.map_or(RefreshRate::Native, RefreshRate::Max)
    }

    /// Install a global `tracing` subscriber.
    ///
    /// `RUST_LOG` wins over `log_filter`. Returns `false` if a subscriber was
    /// already installed.
    pub fn init_logging(&self) -> bool {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_filter));
        tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::from_yaml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
        assert_eq!(config.display_rate(), RefreshRate::Native);
    }

    #[test]
    fn test_full_document() {
        let yaml = "
tick_interval_ms: 20
default_stroke: Individual Medley
default_distance: 200m
clock_format: 12h
display_hz: 30
log_filter: poolside=debug
";
        let config = SessionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.tick_interval_ms, 20);
        assert_eq!(config.default_stroke, Stroke::IndividualMedley);
        assert_eq!(config.default_distance, Distance::M200);
        assert_eq!(config.clock_format, ClockFormat::TwelveHour);
        assert_eq!(config.display_rate(), RefreshRate::Max(30));
        assert_eq!(config.log_filter, "poolside=debug");
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = SessionConfig::from_yaml_str("default_distance: 100m\n").unwrap();
        assert_eq!(config.default_distance, Distance::M100);
        assert_eq!(config.tick_interval_ms, 10);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let zero_tick = SessionConfig::from_yaml_str("tick_interval_ms: 0");
        assert!(matches!(zero_tick, Err(ClubError::Config { .. })));

        let zero_hz = SessionConfig::from_yaml_str("display_hz: 0");
        assert!(matches!(zero_hz, Err(ClubError::Config { .. })));

        let unknown_key = SessionConfig::from_yaml_str("tick_rate: 5");
        assert!(matches!(unknown_key, Err(ClubError::Parse { .. })));

        let bad_stroke = SessionConfig::from_yaml_str("default_stroke: Doggy");
        assert!(matches!(bad_stroke, Err(ClubError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = SessionConfig::load("/nonexistent/poolside.yaml");
        assert!(matches!(result, Err(ClubError::File { .. })));
    }
}
