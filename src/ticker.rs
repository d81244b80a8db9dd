//! Ticker drives the timer engine from a periodic task

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::clock::Clock;
use crate::timer::TimerEngine;

/// Default tick period, matching a centisecond display.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// Engine shared between the ticker task and the host.
///
/// The lock is only held for synchronous read-modify-write steps, never
/// across an await.
pub type SharedTimer<C> = Arc<Mutex<TimerEngine<C>>>;

/// Wrap an engine for sharing with a ticker.
pub fn shared<C: Clock>(engine: TimerEngine<C>) -> SharedTimer<C> {
    Arc::new(Mutex::new(engine))
}

/// Lock a shared engine, recovering from a poisoned lock.
///
/// Engine operations cannot leave the state half-written, so the data behind
/// a poisoned lock is still consistent.
pub fn lock_timer<C: Clock>(timer: &SharedTimer<C>) -> MutexGuard<'_, TimerEngine<C>> {
    timer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of spawning a ticker
pub struct TickerChannels {
    /// Latest elapsed milliseconds, updated when it changes
    pub elapsed: watch::Receiver<u64>,
    /// Cancellation token for stopping the ticker
    pub cancel: CancellationToken,
    /// Ticks per second
    pub tick_hz: f64,
}

/// Spawns and manages the periodic tick task
///
/// Ticks while the engine is stopped or idle are no-ops on the engine, so the
/// task simply runs for the lifetime of the session.
pub struct Ticker;

impl Ticker {
    /// Spawn a ticker for `timer` with the given period
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<C: Clock>(timer: SharedTimer<C>, period: Duration) -> TickerChannels {
        let period = period.max(Duration::from_millis(1));
        let initial = lock_timer(&timer).elapsed();
        let (elapsed_tx, elapsed_rx) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::tick_task(timer, period, elapsed_tx, cancel_task).await;
        });

        TickerChannels { elapsed: elapsed_rx, cancel, tick_hz: 1.0 / period.as_secs_f64() }
    }

    async fn tick_task<C: Clock>(
        timer: SharedTimer<C>,
        period: Duration,
        elapsed_tx: watch::Sender<u64>,
        cancel: CancellationToken,
    ) {
        info!("Ticker started ({:?} period)", period);
        let mut ticks = interval(period);
        // a late tick just reads the clock again; catching up is pointless
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut tick_count = 0u64;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Ticker cancelled");
                    break;
                }
                _ = ticks.tick() => {}
            }

            tick_count += 1;
            let elapsed = lock_timer(&timer).tick();
            trace!(tick = tick_count, elapsed, "Tick");

            elapsed_tx.send_if_modified(|current| {
                if *current == elapsed {
                    false
                } else {
                    *current = elapsed;
                    true
                }
            });

            if elapsed_tx.is_closed() {
                debug!("All elapsed receivers dropped, shutting down");
                break;
            }
        }

        info!("Ticker ended after {} ticks", tick_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn test_ticker_publishes_elapsed_while_running() {
        let clock = ManualClock::new(0);
        let timer = shared(TimerEngine::new(clock.clone()));
        let mut channels = Ticker::spawn(Arc::clone(&timer), DEFAULT_TICK_PERIOD);
        assert_eq!(channels.tick_hz.round(), 100.0);

        lock_timer(&timer).start();
        clock.advance(250);
        tokio::time::sleep(Duration::from_millis(20)).await;

        channels.elapsed.changed().await.unwrap();
        assert_eq!(*channels.elapsed.borrow_and_update(), 250);

        lock_timer(&timer).stop();
        clock.advance(1_000);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*channels.elapsed.borrow(), 250);

        channels.cancel.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_reflects_reset() {
        let clock = ManualClock::new(0);
        let timer = shared(TimerEngine::new(clock.clone()));
        let channels = Ticker::spawn(Arc::clone(&timer), DEFAULT_TICK_PERIOD);

        lock_timer(&timer).start();
        clock.advance(400);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*channels.elapsed.borrow(), 400);

        lock_timer(&timer).reset();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(*channels.elapsed.borrow(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_ends_when_receivers_drop() {
        let timer = shared(TimerEngine::new(ManualClock::new(0)));
        let channels = Ticker::spawn(Arc::clone(&timer), DEFAULT_TICK_PERIOD);
        let cancel = channels.cancel.clone();
        drop(channels);

        tokio::time::sleep(Duration::from_millis(30)).await;
        // the task has exited and released its handle on the engine
        assert_eq!(Arc::strong_count(&timer), 1);
        assert!(!cancel.is_cancelled());
    }
}
