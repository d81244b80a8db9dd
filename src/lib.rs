//! Stopwatch, lap splits and personal-best tracking for swim clubs.
//!
//! Poolside times swimmers with lap splits, commits finished runs to a roster
//! store, and answers history questions over the recorded times.
//!
//! # Features
//!
//! - **Timing engine**: start, pause/resume, laps and reset against an injected clock
//! - **One-shot commits**: each run is logged at most once, and only after the store confirms it
//! - **Personal bests**: per-lap best splits merged on commit and compared live
//! - **History**: best times, progress timelines and improvements per event
//! - **Live roster**: store subscriptions keep every session in sync
//!
//! ## Example
//!
//! ```rust,no_run
//! use poolside::{MemoryStore, SessionConfig, SystemClock, TimingSession};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> poolside::Result<()> {
//!     let store = Arc::new(MemoryStore::new());
//!     let mut session =
//!         TimingSession::open(store, SessionConfig::default(), SystemClock::new()).await?;
//!
//!     let swimmer = session.create_swimmer("Ada").await.expect("store is online");
//!     assert!(session.select_swimmer(Some(&swimmer.id)));
//!
//!     session.start();
//!     // ... pool time ...
//!     session.record_lap();
//!     session.stop();
//!
//!     assert!(session.log_time().await);
//!     Ok(())
//! }
//! ```

// Core types and error handling
pub mod clock;
pub mod config;
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod timestamp;
pub mod types;

// Timing and record keeping
pub mod format;
pub mod history;
pub mod personal_best;
pub mod timer;

// Session architecture
pub mod session;
pub mod store;
pub mod stores;
pub mod stream;
pub mod ticker;

// Core exports
pub use error::*;
pub use types::*;

// Main API exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use format::{ClockFormat, format_improvement, format_time, format_wall_clock};
pub use personal_best::{LapComparison, LapStanding};
pub use session::{Selection, TimingSession};
pub use store::{Listener, RosterSnapshot, Subscription, SwimmerStore};
pub use stores::MemoryStore;
pub use timer::{TimerEngine, TimerSnapshot, TimerState};
