//! Edit session: buffer + debouncer + write-through to the sink
//!
//! Every field edit rearms a single quiescence timer. When the timer fires,
//! the buffer is merged into the active entity and handed to the sink on a
//! detached task, so the edit path never waits for persistence.
//!
//! Cancellation is decided under the session lock with a generation counter:
//! a timer armed before the latest `set_field`, `select`, `cancel` or `close`
//! finds a newer generation when it fires and does nothing. Saves that were
//! already dispatched run to completion.

use crate::buffer::{EditBuffer, EditFields, Field};
use crate::config::SyncConfig;
use crate::debounce::Debouncer;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use store::{AuthContext, Entity, EntityId, EntityStore, PersistenceSink, SinkError};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 64;

/// Why a fired save did not reach the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing was selected when the timer fired
    NoActiveEntity,
    /// The store's active entity is no longer the one being edited
    SelectionChanged,
}

/// Save status notifications for presentation code
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// An edit (re)started the quiescence timer
    Armed { id: Option<EntityId> },
    /// The sink stored the entity
    Saved {
        id: EntityId,
        updated_at: DateTime<Utc>,
    },
    /// The sink call failed; the buffer is left as-is
    Failed { id: EntityId, error: String },
    /// A save fired but had nothing to write to
    Skipped { reason: SkipReason },
}

struct SessionState {
    buffer: EditBuffer,
    /// Bumped by every transition that invalidates an armed timer
    generation: u64,
    /// Edits made since the last dispatched save
    dirty: bool,
    /// Sink calls that have been dispatched and may still be running
    in_flight: Vec<JoinHandle<()>>,
}

struct Shared<S, K> {
    store: Arc<S>,
    sink: Arc<K>,
    auth: AuthContext,
    events: broadcast::Sender<SyncEvent>,
    state: Mutex<SessionState>,
}

impl<S, K> Shared<S, K>
where
    S: EntityStore + 'static,
    K: PersistenceSink + 'static,
{
    fn emit(&self, event: SyncEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Merge the buffer into the store's active entity
    fn prepare_save(&self, state: &SessionState) -> Option<(Entity, EntityId)> {
        let Some(active_id) = state.buffer.active_id() else {
            debug!("Save skipped: no active entity");
            self.emit(SyncEvent::Skipped {
                reason: SkipReason::NoActiveEntity,
            });
            return None;
        };

        let entity = match self.store.get_active() {
            Some(entity) if entity.id == *active_id => entity,
            other => {
                debug!(
                    id = %active_id,
                    active = ?other.map(|e| e.id),
                    "Save skipped: selection changed"
                );
                self.emit(SyncEvent::Skipped {
                    reason: SkipReason::SelectionChanged,
                });
                return None;
            }
        };

        let EditFields { title, description } = state.buffer.snapshot();
        let merged = entity.with_fields(&title, &description);
        Some((merged, active_id.clone()))
    }

    /// Timer callback for the save armed at `generation`
    fn fire(self: &Arc<Self>, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!("Stale debounce timer ignored");
            return;
        }

        state.dirty = false;
        let Some((entity, id)) = self.prepare_save(&state) else {
            return;
        };

        let shared = Arc::clone(self);
        let handle = tokio::spawn(async move {
            // Failures are logged and published inside persist
            let _ = shared.persist(entity, id).await;
        });
        state.in_flight.retain(|h| !h.is_finished());
        state.in_flight.push(handle);
    }

    async fn persist(&self, entity: Entity, id: EntityId) -> Result<Entity, SinkError> {
        match self.sink.save(entity, &self.auth, &id).await {
            Ok(stored) => {
                info!(id = %id, "Entity saved");
                let updated_at = stored.updated_at;
                if !self.store.replace(stored.clone()) {
                    debug!(id = %id, "Saved entity is no longer active; store left unchanged");
                }
                self.emit(SyncEvent::Saved { id, updated_at });
                Ok(stored)
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to save entity");
                self.emit(SyncEvent::Failed {
                    id,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

/// One editing session over the store's active entity
///
/// Methods that arm the timer spawn Tokio tasks and must be called from
/// within a Tokio runtime.
pub struct EditSession<S, K> {
    shared: Arc<Shared<S, K>>,
    debouncer: Debouncer,
    delay: Duration,
}

impl<S, K> EditSession<S, K>
where
    S: EntityStore + 'static,
    K: PersistenceSink + 'static,
{
    pub fn new(store: Arc<S>, sink: Arc<K>, auth: AuthContext, config: &SyncConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                store,
                sink,
                auth,
                events,
                state: Mutex::new(SessionState {
                    buffer: EditBuffer::new(),
                    generation: 0,
                    dirty: false,
                    in_flight: Vec::new(),
                }),
            }),
            debouncer: Debouncer::new(),
            delay: config.debounce(),
        }
    }

    /// Receive save status notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.shared.events.subscribe()
    }

    /// Make `entity` the active entity and start editing it
    ///
    /// Unsaved edits to the previous selection are discarded.
    pub fn select(&mut self, entity: Entity) {
        self.reset(Some(&entity));
        info!(id = %entity.id, "Entity selected");
        self.shared.store.set_active(Some(entity));
    }

    /// Follow the store's current selection
    ///
    /// Seeds the buffer from the active entity, or clears it when nothing is
    /// selected. The store itself is not modified.
    pub fn sync_selection(&mut self) {
        let active = self.shared.store.get_active();
        self.reset(active.as_ref());
    }

    /// Set one field and restart the quiescence timer
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let (generation, id) = {
            let mut state = self.shared.state.lock();
            state.buffer.set_field(field, value.into());
            state.dirty = true;
            state.generation += 1;
            (state.generation, state.buffer.active_id().cloned())
        };

        debug!(field = %field, "Field edited");
        let shared = Arc::clone(&self.shared);
        self.debouncer
            .arm(self.delay, move || shared.fire(generation));
        self.shared.emit(SyncEvent::Armed { id });
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.set_field(Field::Title, title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.set_field(Field::Description, description);
    }

    /// Save pending edits now instead of waiting for the timer
    ///
    /// Returns the stored entity, or `None` when there was nothing to save.
    pub async fn flush(&mut self) -> Result<Option<Entity>, SinkError> {
        self.debouncer.cancel();
        let prepared = {
            let mut state = self.shared.state.lock();
            state.generation += 1;
            if !state.dirty {
                return Ok(None);
            }
            state.dirty = false;
            self.shared.prepare_save(&state)
        };

        match prepared {
            Some((entity, id)) => self.shared.persist(entity, id).await.map(Some),
            None => Ok(None),
        }
    }

    /// Discard the buffer and pending save, keeping the store's selection
    pub fn cancel(&mut self) {
        self.reset(None);
        debug!("Edit cancelled");
    }

    /// Discard the buffer and pending save, and deselect in the store
    ///
    /// Edits younger than the debounce window are dropped, not flushed.
    pub fn close(&mut self) {
        self.reset(None);
        self.shared.store.set_active(None);
        info!("Edit session closed");
    }

    /// Wait until the pending timer has fired and every dispatched save
    /// has finished
    pub async fn settle(&mut self) {
        self.debouncer.wait().await;
        let in_flight = std::mem::take(&mut self.shared.state.lock().in_flight);
        for handle in in_flight {
            let _ = handle.await;
        }
    }

    pub fn snapshot(&self) -> EditFields {
        self.shared.state.lock().buffer.snapshot()
    }

    pub fn active_id(&self) -> Option<EntityId> {
        self.shared.state.lock().buffer.active_id().cloned()
    }

    /// Whether a save is scheduled but has not fired
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether there are edits not yet handed to the sink
    pub fn has_unsaved_edits(&self) -> bool {
        self.shared.state.lock().dirty
    }

    pub fn debounce(&self) -> Duration {
        self.delay
    }

    fn reset(&mut self, entity: Option<&Entity>) {
        if self.debouncer.cancel() {
            debug!("Pending save cancelled");
        }
        let mut state = self.shared.state.lock();
        state.generation += 1;
        state.dirty = false;
        match entity {
            Some(entity) => state.buffer.select(entity),
            None => state.buffer.clear(),
        }
    }
}
