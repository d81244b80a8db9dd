//! Timing session: the host-facing façade
//!
//! A session ties one stopwatch to a roster store. It keeps the roster in sync
//! through the store's subscription, tracks which swimmer and event are
//! selected, and commits finished runs as time records.
//!
//! Store failures never escape as errors from here: reads fall back to empty
//! or default values and writes report `false`, with the cause logged.

use chrono::Utc;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::personal_best::{LapStanding, compare_laps, merge_bests};
use crate::store::{Listener, RosterSnapshot, SwimmerStore};
use crate::stream::ThrottleExt;
use crate::ticker::{SharedTimer, Ticker, lock_timer, shared};
use crate::timer::{TimerEngine, TimerSnapshot};
use crate::types::{
    BestLapTimes, ClubSettings, Distance, Lap, NewSwimmer, RefreshRate, Stroke, Swimmer,
    SwimmerPatch, TimeRecord,
};
use crate::Result;


/// What the timing screen currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub swimmer: Option<String>,
    pub stroke: Stroke,
    pub distance: Distance,
}

/// Stopwatch bound to a roster store
pub struct TimingSession<S: SwimmerStore + ?Sized, C: Clock = SystemClock> {
    store: Arc<S>,
    config: SessionConfig,

    /// Engine shared with the ticker task
    timer: SharedTimer<C>,

    /// Elapsed watch receiver fed by the ticker
    elapsed: watch::Receiver<u64>,

    /// Ticker frequency
    tick_hz: f64,

    /// Local roster, fed by the store subscription and by our own writes
    roster: Arc<watch::Sender<RosterSnapshot>>,

    /// Keeps the store subscription alive
    _listener: Listener,

    selection: Selection,

    /// Cancellation token for stopping the ticker
    cancel: CancellationToken,
}

impl<S: SwimmerStore + ?Sized, C: Clock> TimingSession<S, C> {
    /// Open a session on `store`.
    ///
    /// Loads the roster (an unreachable store yields an empty roster), starts
    /// listening for roster changes and spawns the ticker. Must be called
    /// within a tokio runtime. Fails only on invalid configuration.
    pub async fn open(store: Arc<S>, config: SessionConfig, clock: C) -> Result<Self> {
        config.validate()?;

        let initial = match store.fetch_swimmers().await {
            Ok(swimmers) => swimmers,
            Err(e) => {
                warn!("Failed to load swimmers, starting with an empty roster: {}", e);
                Vec::new()
            }
        };
        info!("Opening timing session with {} swimmers", initial.len());

        let (roster_tx, _) = watch::channel(Arc::new(initial));
        let roster = Arc::new(roster_tx);

        let forward = Arc::clone(&roster);
        let listener = store.subscribe().listen(move |snapshot| {
            debug!("Roster update with {} swimmers", snapshot.len());
            forward.send_replace(snapshot);
        });

        let timer = shared(TimerEngine::new(clock));
        let channels = Ticker::spawn(Arc::clone(&timer), config.tick_interval());

        let selection = Selection {
            swimmer: None,
            stroke: config.default_stroke,
            distance: config.default_distance,
        };

        Ok(Self {
            store,
            config,
            timer,
            elapsed: channels.elapsed,
            tick_hz: channels.tick_hz,
            roster,
            _listener: listener,
            selection,
            cancel: channels.cancel,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // -- stopwatch ---------------------------------------------------------

    /// Start or resume the stopwatch.
    pub fn start(&self) -> bool {
        lock_timer(&self.timer).start()
    }

    /// Stop the stopwatch, freezing elapsed and laps.
    pub fn stop(&self) -> bool {
        lock_timer(&self.timer).stop()
    }

    /// Clear the stopwatch back to zero.
    pub fn reset(&self) {
        lock_timer(&self.timer).reset();
    }

    /// Record a lap; `None` when the stopwatch is not running.
    pub fn record_lap(&self) -> Option<Lap> {
        lock_timer(&self.timer).record_lap()
    }

    /// Current elapsed milliseconds, read fresh from the clock.
    pub fn elapsed(&self) -> u64 {
        lock_timer(&self.timer).tick()
    }

    pub fn is_running(&self) -> bool {
        lock_timer(&self.timer).is_running()
    }

    pub fn laps(&self) -> Vec<Lap> {
        lock_timer(&self.timer).laps().to_vec()
    }

    pub fn timer_snapshot(&self) -> TimerSnapshot {
        let mut timer = lock_timer(&self.timer);
        timer.tick();
        timer.snapshot()
    }

    /// Elapsed-time updates at no more than `rate`.
    pub fn elapsed_updates(&self, rate: RefreshRate) -> BoxStream<'static, u64> {
        let updates = WatchStream::new(self.elapsed.clone());
        match rate.throttle_interval(self.tick_hz) {
            None => updates.boxed(),
            Some(period) => updates.throttle(period).boxed(),
        }
    }

    /// Elapsed-time updates at the configured display rate.
    pub fn display_updates(&self) -> BoxStream<'static, u64> {
        self.elapsed_updates(self.config.display_rate())
    }

    // -- roster ------------------------------------------------------------

    /// Latest roster snapshot.
    pub fn swimmers(&self) -> RosterSnapshot {
        Arc::clone(&self.roster.borrow())
    }

    /// Roster snapshots, current one first.
    pub fn roster_updates(&self) -> impl Stream<Item = RosterSnapshot> + Send + 'static {
        WatchStream::new(self.roster.subscribe())
    }

    pub fn find_swimmer(&self, id: &str) -> Option<Swimmer> {
        self.roster.borrow().iter().find(|s| s.id == id).cloned()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Select a swimmer by id, or clear the selection with `None`.
    ///
    /// Returns `false` and leaves the selection alone for an unknown id.
    pub fn select_swimmer(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.selection.swimmer = None;
                true
            }
            Some(id) if self.find_swimmer(id).is_some() => {
                self.selection.swimmer = Some(id.to_string());
                true
            }
            Some(id) => {
                debug!(id, "Ignoring selection of unknown swimmer");
                false
            }
        }
    }

    pub fn select_stroke(&mut self, stroke: Stroke) {
        self.selection.stroke = stroke;
    }

    pub fn select_distance(&mut self, distance: Distance) {
        self.selection.distance = distance;
    }

    pub fn selected_swimmer(&self) -> Option<Swimmer> {
        self.selection.swimmer.as_deref().and_then(|id| self.find_swimmer(id))
    }

    /// Current laps classified against the selected swimmer's bests.
    ///
    /// Without a selection every lap is neutral.
    pub fn lap_comparisons(&self) -> Vec<LapStanding> {
        let best = self.selected_swimmer().map(|s| s.best_lap_times).unwrap_or_default();
        compare_laps(&best, &self.laps())
    }

    /// Add a swimmer. Blank names are refused.
    pub async fn create_swimmer(&self, name: &str) -> Option<Swimmer> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Refusing to create a swimmer with an empty name");
            return None;
        }

        match self.store.create_swimmer(NewSwimmer::named(name)).await {
            Ok(swimmer) => {
                info!(id = %swimmer.id, "Created swimmer {}", swimmer.name);
                self.roster.send_if_modified(|roster| add_to_roster(roster, &swimmer));
                Some(swimmer)
            }
            Err(e) => {
                warn!("Failed to create swimmer '{}': {}", name, e);
                None
            }
        }
    }

    /// Remove a swimmer, clearing the selection if it pointed at them.
    pub async fn remove_swimmer(&mut self, id: &str) -> bool {
        match self.store.delete_swimmer(id).await {
            Ok(()) => {
                self.roster.send_if_modified(|roster| remove_from_roster(roster, id));
                if self.selection.swimmer.as_deref() == Some(id) {
                    self.selection.swimmer = None;
                }
                info!(id, "Removed swimmer");
                true
            }
            Err(e) => {
                warn!(id, "Failed to remove swimmer: {}", e);
                false
            }
        }
    }

    // -- commit ------------------------------------------------------------

    /// Commit the current run for the selected swimmer and event.
    ///
    /// A no-op returning `false` when no known swimmer is selected, nothing
    /// has been timed, or this run was already logged. The run is marked
    /// logged only after the store accepts the write.
    pub async fn log_time(&mut self) -> bool {
        let Some(swimmer) = self.selected_swimmer() else {
            debug!("No swimmer selected, nothing to log");
            return false;
        };
        let pending = lock_timer(&self.timer).pending_run();
        let Some(run) = pending else {
            debug!("No unlogged run to commit");
            return false;
        };

        let record = TimeRecord {
            id: uuid::Uuid::new_v4().to_string(),
            time: run.elapsed,
            date: Utc::now(),
            stroke: self.selection.stroke,
            distance: self.selection.distance,
            laps: run.laps,
        };
        let base_len = swimmer.times.len();
        let patch = commit_patch(&swimmer, record);

        if let Err(e) = self.store.update_swimmer(&swimmer.id, patch.clone()).await {
            error!(swimmer = %swimmer.id, "Failed to log time: {}", e);
            return false;
        }

        let marked = lock_timer(&self.timer).mark_logged(run.generation);
        if !marked {
            debug!("Timer moved to a new run while the commit was in flight");
        }

        // Reflect our own write before the subscription catches up
        self.roster.send_if_modified(|roster| {
            apply_own_write(roster, &swimmer.id, base_len, patch)
        });

        info!(
            swimmer = %swimmer.id,
            time = run.elapsed,
            stroke = %self.selection.stroke,
            distance = %self.selection.distance,
            "Logged time"
        );
        true
    }

    // -- club settings -----------------------------------------------------

    /// Club settings, or the defaults when the store cannot provide them.
    pub async fn club_settings(&self) -> ClubSettings {
        self.store.club_settings().await.unwrap_or_else(|e| {
            warn!("Failed to load club settings, using defaults: {}", e);
            ClubSettings::default()
        })
    }

    pub async fn save_club_settings(&self, settings: ClubSettings) -> bool {
        match self.store.update_club_settings(settings).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save club settings: {}", e);
                false
            }
        }
    }

    /// Upload a logo and point the club settings at it.
    pub async fn upload_club_logo(&self, file_name: &str, bytes: Vec<u8>) -> bool {
        if bytes.is_empty() {
            debug!("Refusing to upload an empty logo");
            return false;
        }

        let url = match self.store.upload_file(file_name, bytes).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Failed to upload logo: {}", e);
                return false;
            }
        };

        let settings = ClubSettings { logo_url: Some(url), ..self.club_settings().await };
        self.save_club_settings(settings).await
    }

    /// Stop the ticker and drop the roster subscription.
    ///
    /// Streams from [`elapsed_updates`](Self::elapsed_updates) and
    /// [`roster_updates`](Self::roster_updates) end once the background tasks
    /// have exited. Dropping the session does the same.
    pub fn close(self) {
        debug!("Closing timing session");
    }
}

impl<S: SwimmerStore + ?Sized, C: Clock> Drop for TimingSession<S, C> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Patch appending `record` to a swimmer's history with refreshed bests.
pub fn commit_patch(swimmer: &Swimmer, record: TimeRecord) -> SwimmerPatch {
    let best_lap_times: BestLapTimes = merge_bests(&swimmer.best_lap_times, &record.laps);
    let mut times = swimmer.times.clone();
    times.push(record);
    SwimmerPatch { name: None, times: Some(times), best_lap_times: Some(best_lap_times) }
}

/// Add a freshly created swimmer unless the subscription already delivered it.
fn add_to_roster(roster: &mut RosterSnapshot, swimmer: &Swimmer) -> bool {
    if roster.iter().any(|s| s.id == swimmer.id) {
        return false;
    }
    let mut updated: Vec<Swimmer> = roster.iter().cloned().collect();
    updated.push(swimmer.clone());
    *roster = Arc::new(updated);
    true
}

/// Drop a deleted swimmer from the roster.
fn remove_from_roster(roster: &mut RosterSnapshot, id: &str) -> bool {
    if !roster.iter().any(|s| s.id == id) {
        return false;
    }
    *roster = Arc::new(roster.iter().filter(|s| s.id != id).cloned().collect());
    true
}

/// Apply our own commit to the local roster.
///
/// Skipped when the swimmer's history no longer has `base_len` records: the
/// subscription has already delivered a newer document, which wins.
fn apply_own_write(
    roster: &mut RosterSnapshot,
    id: &str,
    base_len: usize,
    patch: SwimmerPatch,
) -> bool {
    let current = roster.iter().find(|s| s.id == id).map(|s| s.times.len());
    if current != Some(base_len) {
        debug!(id, ?current, base_len, "Roster already moved on, not applying local commit");
        return false;
    }

    let mut updated: Vec<Swimmer> = roster.iter().cloned().collect();
    if let Some(target) = updated.iter_mut().find(|s| s.id == id) {
        target.apply(patch);
    }
    *roster = Arc::new(updated);
    true
}
