//! In-memory roster store

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::store::{RosterSnapshot, Subscription, SwimmerStore};
use crate::types::{ClubSettings, NewSwimmer, Swimmer, SwimmerPatch};
use crate::{ClubError, Result};

#[derive(Default)]
struct MemoryState {
    /// Roster in creation order
    swimmers: Vec<Swimmer>,
    settings: Option<ClubSettings>,
    uploads: Vec<(String, Vec<u8>)>,
}

/// Store that keeps the roster in process memory
///
/// Behaves like a document store with whole-field updates: a patch replaces
/// the fields it carries and the last write wins. Subscribers receive the full
/// roster after every successful write.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    roster_tx: watch::Sender<RosterSnapshot>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        let (roster_tx, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            state: Mutex::new(MemoryState::default()),
            roster_tx,
            available: AtomicBool::new(true),
        }
    }

    /// Create a store seeded with existing swimmers
    pub fn with_swimmers(swimmers: impl IntoIterator<Item = Swimmer>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            state.swimmers.extend(swimmers);
            store.publish(&state);
        }
        info!("Seeded memory store with {} swimmers", store.lock().swimmers.len());
        store
    }

    /// Simulate the backend going away (`false`) or coming back (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        debug!("Memory store availability set to {}", available);
    }

    /// Bytes previously stored under `url`
    pub fn uploaded(&self, url: &str) -> Option<Vec<u8>> {
        self.lock().uploads.iter().find(|(u, _)| u == url).map(|(_, bytes)| bytes.clone())
    }

    /// Number of live roster subscriptions
    pub fn roster_receiver_count(&self) -> usize {
        self.roster_tx.receiver_count()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_available(&self, operation: &str) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            warn!(operation, "Memory store is unavailable");
            Err(ClubError::unavailable(format!("{} attempted while store is offline", operation)))
        }
    }

    fn publish(&self, state: &MemoryState) {
        self.roster_tx.send_replace(Arc::new(state.swimmers.clone()));
    }
}

#[async_trait::async_trait]
impl SwimmerStore for MemoryStore {
    async fn fetch_swimmers(&self) -> Result<Vec<Swimmer>> {
        self.check_available("fetch_swimmers")?;
        Ok(self.lock().swimmers.clone())
    }

    async fn create_swimmer(&self, swimmer: NewSwimmer) -> Result<Swimmer> {
        self.check_available("create_swimmer")?;

        let created = swimmer.with_id(uuid::Uuid::new_v4().simple().to_string());
        let mut state = self.lock();
        state.swimmers.push(created.clone());
        self.publish(&state);

        debug!(id = %created.id, name = %created.name, "Swimmer created");
        Ok(created)
    }

    async fn update_swimmer(&self, id: &str, patch: SwimmerPatch) -> Result<()> {
        self.check_available("update_swimmer")?;

        let mut state = self.lock();
        let swimmer =
            state.swimmers.iter_mut().find(|s| s.id == id).ok_or_else(|| ClubError::not_found(id))?;
        swimmer.apply(patch);
        self.publish(&state);

        debug!(id, "Swimmer updated");
        Ok(())
    }

    async fn delete_swimmer(&self, id: &str) -> Result<()> {
        self.check_available("delete_swimmer")?;

        let mut state = self.lock();
        let before = state.swimmers.len();
        state.swimmers.retain(|s| s.id != id);
        if state.swimmers.len() == before {
            return Err(ClubError::not_found(id));
        }
        self.publish(&state);

        debug!(id, "Swimmer deleted");
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        Subscription::new(self.roster_tx.subscribe())
    }

    async fn club_settings(&self) -> Result<ClubSettings> {
        self.check_available("club_settings")?;
        Ok(self.lock().settings.clone().unwrap_or_default())
    }

    async fn update_club_settings(&self, settings: ClubSettings) -> Result<()> {
        self.check_available("update_club_settings")?;
        self.lock().settings = Some(settings);
        Ok(())
    }

    async fn upload_file(&self, name: &str, bytes: Vec<u8>) -> Result<String> {
        self.check_available("upload_file")?;
        if name.trim().is_empty() {
            return Err(ClubError::validation("upload needs a file name"));
        }

        let mut state = self.lock();
        let url = format!("memory://uploads/{}/{}", state.uploads.len(), name.trim());
        debug!(%url, size = bytes.len(), "File uploaded");
        state.uploads.push((url.clone(), bytes));
        Ok(url)
    }
}
