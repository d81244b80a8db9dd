//! Core data types for swimmers, their records and laps.
//!
//! These are plain values: the timing engine produces them, the store persists
//! them, and the history queries read them. None of them holds a reference
//! back into storage.
//!
//! ## Document shape
//!
//! Serialization uses the store's camelCase document shape (`splitTime`,
//! `bestLapTimes`, `logoUrl`). Record dates go through
//! [`crate::timestamp`] on the way in so that every [`TimeRecord`] carries a
//! canonical UTC timestamp.
//!
//! ```rust
//! use poolside::types::{Distance, Lap, Stroke, Swimmer};
//!
//! let json = r#"{
//!     "id": "s1",
//!     "name": "Ada",
//!     "times": [{
//!         "id": "r1", "time": 29870, "date": "2024-01-02T09:00:00Z",
//!         "stroke": "Freestyle", "distance": "50m",
//!         "laps": [{"number": 1, "time": 14100, "splitTime": 14100}]
//!     }],
//!     "bestLapTimes": {"1": 14100}
//! }"#;
//!
//! let swimmer: Swimmer = serde_json::from_str(json).unwrap();
//! assert!(swimmer.times[0].is_event(Stroke::Freestyle, Distance::M50));
//! assert_eq!(swimmer.times[0].laps[0], Lap::new(1, 14_100, 14_100));
//! ```

mod event;
mod lap;
mod record;
mod refresh_rate;
mod settings;
mod swimmer;

pub use event::{Distance, Stroke};
pub use lap::Lap;
pub use record::TimeRecord;
pub use refresh_rate::RefreshRate;
pub use settings::{ClubSettings, DEFAULT_CLUB_NAME};
pub use swimmer::{BestLapTimes, NewSwimmer, Swimmer, SwimmerPatch};
