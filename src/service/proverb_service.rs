//! Proverb service: the state-mutating operations behind the tool surface.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{EventBus, SessionState, StateSnapshotEvent};
use crate::persistence::{PersistOutcome, ProverbStore};

/// Orchestration layer for all proverb operations.
///
/// Owns the [`SessionState`], a [`ProverbStore`] mirror, and the
/// [`EventBus`]. Every mutation follows the same pattern: take the write
/// lock → mutate memory → snapshot → mirror to storage → publish → return
/// the snapshot. The in-memory result is authoritative; a failed mirror
/// write is logged and nothing is rolled back.
///
/// # Concurrency
///
/// Mutations are serialized by `write_lock`, held until the snapshot is
/// published. The table therefore always receives snapshots in the order
/// they were taken, and subscribers see them in that order too. Reads do
/// not take the write lock.
#[derive(Debug, Clone)]
pub struct ProverbService {
    state: Arc<SessionState>,
    store: Arc<dyn ProverbStore>,
    event_bus: EventBus,
    write_lock: Arc<Mutex<()>>,
}

impl ProverbService {
    /// Creates a new `ProverbService`.
    #[must_use]
    pub fn new(state: Arc<SessionState>, store: Arc<dyn ProverbStore>, event_bus: EventBus) -> Self {
        Self {
            state,
            store,
            event_bus,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns the current proverbs. Never mutates state.
    pub async fn get(&self) -> Vec<String> {
        let proverbs = self.state.proverbs().await;
        tracing::debug!(count = proverbs.len(), ?proverbs, "getting proverbs");
        proverbs
    }

    /// Appends `items` to the end of the list.
    pub async fn add(&self, items: Vec<String>) -> StateSnapshotEvent {
        let _guard = self.write_lock.lock().await;
        let added = items.len();
        let state = self.state.append(items).await;
        tracing::info!(added, total = state.proverbs.len(), "proverbs added");
        self.commit(StateSnapshotEvent::new(state)).await
    }

    /// Replaces the whole list with `items`.
    pub async fn set(&self, items: Vec<String>) -> StateSnapshotEvent {
        let _guard = self.write_lock.lock().await;
        let state = self.state.replace(items).await;
        tracing::info!(total = state.proverbs.len(), "proverbs set");
        self.commit(StateSnapshotEvent::new(state)).await
    }

    /// Loads stored proverbs into the session, returning how many were loaded.
    pub async fn hydrate(&self) -> usize {
        let _guard = self.write_lock.lock().await;
        let items = self.store.get_all().await;
        self.state.hydrate(items).await
    }

    /// Mirrors the snapshot to storage and publishes it, whatever the
    /// storage outcome. Callers hold `write_lock`.
    async fn commit(&self, event: StateSnapshotEvent) -> StateSnapshotEvent {
        match self.store.replace_all(event.proverbs()).await {
            PersistOutcome::Persisted { rows } => {
                tracing::debug!(rows, "snapshot persisted");
            }
            PersistOutcome::Failed { reason } => {
                tracing::warn!(%reason, "could not save proverbs to database; keeping in-memory state");
            }
        }
        let _ = self.event_bus.publish(event.clone());
        event
    }
}
