//! Stream utilities for display consumers

mod throttle;

pub use throttle::{Throttle, ThrottleExt};
