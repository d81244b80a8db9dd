//! Stopwatch engine with lap splitting.
//!
//! The engine owns the transient state of one stopwatch: phase, elapsed time,
//! recorded laps and the one-shot commit guard. Time comes from an injected
//! [`Clock`], so the engine runs identically against the system clock and a
//! [`ManualClock`](crate::clock::ManualClock) in tests.
//!
//! ```rust
//! use poolside::clock::ManualClock;
//! use poolside::timer::TimerEngine;
//!
//! let clock = ManualClock::new(0);
//! let mut timer = TimerEngine::new(clock.clone());
//!
//! timer.start();
//! clock.advance(14_200);
//! let lap = timer.record_lap().unwrap();
//! assert_eq!((lap.number, lap.split_time), (1, 14_200));
//!
//! clock.advance(15_100);
//! timer.stop();
//! assert_eq!(timer.elapsed(), 29_300);
//! ```

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::types::Lap;

/// Stopwatch phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    /// Zero elapsed, no laps
    Idle,
    Running,
    /// Elapsed and laps frozen, awaiting commit, resume or reset
    Stopped,
}

/// Read-only copy of the engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub elapsed: u64,
    pub laps: Vec<Lap>,
    pub has_logged: bool,
}

impl TimerSnapshot {
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}

/// A run handed out for committing.
///
/// `generation` identifies the run so that a commit confirmed after a reset or
/// restart does not mark the new run as logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRun {
    pub generation: u64,
    pub elapsed: u64,
    pub laps: Vec<Lap>,
}

/// Stopwatch state machine.
pub struct TimerEngine<C: Clock = SystemClock> {
    clock: C,
    state: TimerState,
    /// Elapsed value when the current running segment began
    accumulated_ms: u64,
    /// Clock reading when the current running segment began
    segment_start_ms: u64,
    elapsed_ms: u64,
    laps: Vec<Lap>,
    last_lap_mark: u64,
    generation: u64,
    logged: bool,
}

impl Default for TimerEngine<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            accumulated_ms: 0,
            segment_start_ms: 0,
            elapsed_ms: 0,
            laps: Vec::new(),
            last_lap_mark: 0,
            generation: 0,
            logged: false,
        }
    }

    /// Start or resume counting. Returns `false` if already running.
    ///
    /// Resuming from `Stopped` continues from the frozen elapsed value.
    pub fn start(&mut self) -> bool {
        if self.state == TimerState::Running {
            return false;
        }

        self.accumulated_ms = self.elapsed_ms;
        self.segment_start_ms = self.clock.now_ms();
        self.state = TimerState::Running;
        self.logged = false;
        self.generation += 1;

        debug!(elapsed = self.elapsed_ms, generation = self.generation, "Timer started");
        true
    }

    /// Refresh elapsed from the clock. No-op unless running.
    pub fn tick(&mut self) -> u64 {
        if self.state == TimerState::Running {
            let segment = self.clock.now_ms().saturating_sub(self.segment_start_ms);
            // never step backwards, even if the clock does
            self.elapsed_ms = self.elapsed_ms.max(self.accumulated_ms + segment);
            trace!(elapsed = self.elapsed_ms, "Timer tick");
        }
        self.elapsed_ms
    }

    /// Freeze elapsed and laps. Returns `false` if not running.
    pub fn stop(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }

        self.tick();
        self.accumulated_ms = self.elapsed_ms;
        self.state = TimerState::Stopped;

        debug!(elapsed = self.elapsed_ms, laps = self.laps.len(), "Timer stopped");
        true
    }

    /// Record a lap at the current elapsed time.
    ///
    /// Returns `None` without touching the lap list when not running.
    pub fn record_lap(&mut self) -> Option<Lap> {
        if self.state != TimerState::Running {
            return None;
        }

        let elapsed = self.tick();
        let lap = Lap::new(
            self.laps.len() as u32 + 1,
            elapsed,
            elapsed.saturating_sub(self.last_lap_mark),
        );
        self.laps.push(lap);
        self.last_lap_mark = elapsed;

        debug!(number = lap.number, time = lap.time, split = lap.split_time, "Lap recorded");
        Some(lap)
    }

    /// Back to `Idle` from any state.
    pub fn reset(&mut self) {
        self.state = TimerState::Idle;
        self.accumulated_ms = 0;
        self.segment_start_ms = 0;
        self.elapsed_ms = 0;
        self.laps.clear();
        self.last_lap_mark = 0;
        self.logged = false;
        self.generation += 1;

        debug!("Timer reset");
    }

    /// The current run, if it can be committed.
    ///
    /// `None` when nothing has been timed yet or the run was already logged.
    pub fn pending_run(&mut self) -> Option<CompletedRun> {
        let elapsed = self.tick();
        if elapsed == 0 || self.logged {
            return None;
        }

        Some(CompletedRun { generation: self.generation, elapsed, laps: self.laps.clone() })
    }

    /// Mark the run with `generation` as logged.
    ///
    /// Returns `false` if the engine has moved on to another run since.
    pub fn mark_logged(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Commit confirmed for a stale run");
            return false;
        }
        self.logged = true;
        true
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn has_logged(&self) -> bool {
        self.logged
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            elapsed: self.elapsed_ms,
            laps: self.laps.clone(),
            has_logged: self.logged,
        }
    }
}
