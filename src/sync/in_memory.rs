use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::events::{Event, EventDraft, EventId};
use crate::sync::event_api::{RemoteError, RemoteEventStore};

const UNAVAILABLE: u16 = 503;
const NOT_FOUND: u16 = 404;

#[derive(Debug, Default)]
struct Records {
    events: Vec<Event>,
    next_id: u64,
}

/// Process-local stand-in for the events endpoint. Assigns ids sequentially
/// and never reuses one, even after a delete.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    records: Mutex<Records>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        let next_id = events.iter().map(|e| e.id.0).max().unwrap_or(0);
        Self {
            records: Mutex::new(Records { events, next_id }),
            ..Self::default()
        }
    }

    /// While offline every call fails with a 503.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Vec<Event> {
        self.records.lock().await.events.clone()
    }

    fn begin_call(&self, action: &str) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            tracing::error!("Failed to {}: store offline", action);
            return Err(RemoteError::status(UNAVAILABLE, "store offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteEventStore for InMemoryEventStore {
    async fn list(&self) -> Result<Vec<Event>, RemoteError> {
        self.begin_call("list events")?;
        Ok(self.records.lock().await.events.clone())
    }

    async fn create(&self, draft: &EventDraft) -> Result<Event, RemoteError> {
        self.begin_call("create event")?;
        let mut records = self.records.lock().await;
        records.next_id += 1;
        let event = Event::from_draft(EventId(records.next_id), draft.clone());
        records.events.push(event.clone());
        tracing::debug!("In-memory create assigned ID {}", event.id);
        Ok(event)
    }

    async fn remove(&self, id: EventId) -> Result<serde_json::Value, RemoteError> {
        self.begin_call("delete event")?;
        let mut records = self.records.lock().await;
        let Some(index) = records.events.iter().position(|e| e.id == id) else {
            return Err(RemoteError::status(NOT_FOUND, format!("event {} not found", id)));
        };
        let removed = records.events.remove(index);
        Ok(serde_json::to_value(removed).unwrap_or(serde_json::Value::Null))
    }

    async fn update(&self, id: EventId, draft: &EventDraft) -> Result<Event, RemoteError> {
        self.begin_call("update event")?;
        let mut records = self.records.lock().await;
        let Some(slot) = records.events.iter_mut().find(|e| e.id == id) else {
            return Err(RemoteError::status(NOT_FOUND, format!("event {} not found", id)));
        };
        *slot = Event::from_draft(id, draft.clone());
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(name: &str) -> EventDraft {
        EventDraft::new(name, "2024-03-01", "2024-03-02")
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let store = InMemoryEventStore::new();
        let first = store.create(&draft("One")).await.unwrap();
        store.remove(first.id).await.unwrap();

        let second = store.create(&draft("Two")).await.unwrap();

        assert_eq!(first.id, EventId(1));
        assert_eq!(second.id, EventId(2));
        assert_eq!(store.snapshot().await, vec![second]);
    }

    #[tokio::test]
    async fn seeded_store_continues_after_highest_id() {
        let seeded = Event::from_draft(EventId(10), draft("Seed"));
        let store = InMemoryEventStore::with_events(vec![seeded]);

        let created = store.create(&draft("Next")).await.unwrap();

        assert_eq!(created.id, EventId(11));
    }

    #[tokio::test]
    async fn offline_store_fails_and_counts_the_attempt() {
        let store = InMemoryEventStore::new();
        store.set_offline(true);

        let result = store.list().await;

        assert!(matches!(result, Err(RemoteError::Status { status: 503, .. })));
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let store = InMemoryEventStore::new();

        let result = store.update(EventId(3), &draft("Ghost")).await;

        assert!(matches!(result, Err(RemoteError::Status { status: 404, .. })));
    }
}
