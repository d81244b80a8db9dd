//! Store trait for the roster backend

use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::Result;
use crate::types::{ClubSettings, NewSwimmer, Swimmer, SwimmerPatch};

/// Full roster as delivered to subscribers.
pub type RosterSnapshot = Arc<Vec<Swimmer>>;

/// Trait for roster backends
///
/// Stores own the swimmer documents, club settings and uploaded files. Every
/// operation is independently fallible; callers decide how to surface a
/// failure. Concurrent writers to one swimmer are not coordinated: an update
/// replaces the fields it names, and the last write wins.
#[async_trait::async_trait]
pub trait SwimmerStore: Send + Sync + 'static {
    /// Every swimmer currently in the roster.
    async fn fetch_swimmers(&self) -> Result<Vec<Swimmer>>;

    /// Create a swimmer, returning it with its assigned id.
    async fn create_swimmer(&self, swimmer: NewSwimmer) -> Result<Swimmer>;

    /// Replace the fields set in `patch` on swimmer `id`.
    async fn update_swimmer(&self, id: &str, patch: SwimmerPatch) -> Result<()>;

    /// Remove swimmer `id`.
    async fn delete_swimmer(&self, id: &str) -> Result<()>;

    /// Live roster updates.
    ///
    /// The subscription yields the current roster first and then the full
    /// roster after every change.
    fn subscribe(&self) -> Subscription;

    /// Club settings, or the defaults if none were saved.
    async fn club_settings(&self) -> Result<ClubSettings>;

    /// Persist club settings.
    async fn update_club_settings(&self, settings: ClubSettings) -> Result<()>;

    /// Store a file and return the URL it can be fetched from.
    async fn upload_file(&self, name: &str, bytes: Vec<u8>) -> Result<String>;
}

/// Handle on a store's live roster.
///
/// Dropping the subscription unsubscribes.
pub struct Subscription {
    snapshots: watch::Receiver<RosterSnapshot>,
}

impl Subscription {
    pub fn new(snapshots: watch::Receiver<RosterSnapshot>) -> Self {
        Self { snapshots }
    }

    /// The latest roster without waiting for a change.
    pub fn current(&self) -> RosterSnapshot {
        Arc::clone(&self.snapshots.borrow())
    }

    /// Receiver for callers that want to await changes directly.
    pub fn receiver(&self) -> watch::Receiver<RosterSnapshot> {
        self.snapshots.clone()
    }

    /// Roster snapshots as a stream, current one first.
    pub fn into_stream(self) -> impl Stream<Item = RosterSnapshot> + Send + 'static {
        WatchStream::new(self.snapshots)
    }

    /// Deliver every snapshot to `callback` from a background task.
    ///
    /// Must be called from within a tokio runtime. The returned handle stops
    /// delivery when unsubscribed or dropped.
    pub fn listen<F>(self, mut callback: F) -> Listener
    where
        F: FnMut(RosterSnapshot) + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let mut stream = self.into_stream().boxed();

        tokio::spawn(async move {
            loop {
                let snapshot = tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    next = stream.next() => next,
                };
                match snapshot {
                    Some(roster) => callback(roster),
                    None => {
                        debug!("Roster source closed, listener ending");
                        break;
                    }
                }
            }
        });

        Listener { cancel }
    }
}

/// Background roster listener started by [`Subscription::listen`].
pub struct Listener {
    cancel: CancellationToken,
}

impl Listener {
    /// Stop delivering snapshots.
    pub fn unsubscribe(self) {
        self.cancel.cancel();
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
