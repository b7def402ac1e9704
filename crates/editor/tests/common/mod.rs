//! Shared fixtures for edit session integration tests

use async_trait::async_trait;
use editor::{EditSession, SyncConfig};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use store::{ActiveEntityStore, AuthContext, Entity, EntityId, PersistenceSink, SinkError};

/// One recorded sink call
#[derive(Debug, Clone)]
pub struct SaveCall {
    pub id: EntityId,
    pub entity: Entity,
    pub auth: AuthContext,
}

/// Sink that records every call and can be told to fail or stall
#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<SaveCall>>,
    fail: AtomicBool,
    latency: Mutex<Option<Duration>>,
}

impl RecordingSink {
    pub fn calls(&self) -> Vec<SaveCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = Some(latency);
    }
}

#[async_trait]
impl PersistenceSink for RecordingSink {
    async fn save(
        &self,
        entity: Entity,
        auth: &AuthContext,
        id: &EntityId,
    ) -> Result<Entity, SinkError> {
        self.calls.lock().push(SaveCall {
            id: id.clone(),
            entity: entity.clone(),
            auth: auth.clone(),
        });

        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(SinkError::Rejected("backend unavailable".to_string()));
        }

        Ok(Entity {
            updated_at: chrono::Utc::now(),
            ..entity
        })
    }
}

pub type TestSession = EditSession<ActiveEntityStore, RecordingSink>;

pub struct Harness {
    pub session: TestSession,
    pub store: Arc<ActiveEntityStore>,
    pub sink: Arc<RecordingSink>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(1000))
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        let store = Arc::new(ActiveEntityStore::new());
        let sink = Arc::new(RecordingSink::default());
        let session = EditSession::new(
            Arc::clone(&store),
            Arc::clone(&sink),
            AuthContext::for_user("tester"),
            &SyncConfig::with_debounce(debounce),
        );
        Self {
            session,
            store,
            sink,
        }
    }
}

pub fn entity(id: &str, title: &str, description: &str) -> Entity {
    Entity::with_id(EntityId::new(id), title, description)
}

pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
