use crate::events::{AsEventId, Event, EventDraft, EventId};
use crate::sync::event_api::{RemoteError, RemoteEventStore};

/// Authoritative ordered set of event records, in arrival order.
///
/// Local state changes only after the remote store confirms an operation.
/// A failed call leaves the records untouched and hands the error back.
pub struct EventCollection<S> {
    store: S,
    events: Vec<Event>,
}

impl<S: RemoteEventStore> EventCollection<S> {
    pub fn new(store: S) -> Self {
        Self { store, events: Vec::new() }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|e| e.id == id)
    }

    pub fn find_by_id(&self, id: impl AsEventId) -> Option<&Event> {
        let id = id.as_event_id()?;
        self.events.iter().find(|e| e.id == id)
    }

    pub async fn load(&mut self) -> Result<&[Event], RemoteError> {
        let events = self.store.list().await?;
        tracing::info!("Loaded {} events", events.len());
        self.events = events;
        Ok(&self.events)
    }

    pub async fn create(&mut self, draft: &EventDraft) -> Result<Event, RemoteError> {
        let created = self.store.create(draft).await?;

        match self.position(created.id) {
            Some(index) => {
                tracing::warn!("Store returned existing ID {} for a create", created.id);
                self.events[index] = created.clone();
            }
            None => self.events.push(created.clone()),
        }

        Ok(created)
    }

    pub async fn remove(&mut self, id: EventId) -> Result<serde_json::Value, RemoteError> {
        let ack = self.store.remove(id).await?;
        self.events.retain(|e| e.id != id);
        Ok(ack)
    }

    pub async fn edit(&mut self, id: EventId, draft: &EventDraft) -> Result<Event, RemoteError> {
        let updated = self.store.update(id, draft).await?;
        if updated.id != id {
            tracing::error!("Store answered update of {} with event {}", id, updated.id);
            return Err(RemoteError::MismatchedId { requested: id, returned: updated.id });
        }

        match self.position(id) {
            Some(index) => self.events[index] = updated.clone(),
            None => {
                tracing::warn!("Edited event {} was not in the local collection", id);
                self.events.push(updated.clone());
            }
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::event_api::MockRemoteEventStore;
    use crate::sync::in_memory::InMemoryEventStore;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn event(id: u64, name: &str) -> Event {
        Event {
            id: EventId(id),
            event_name: name.to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-02".to_string(),
        }
    }

    async fn loaded(events: Vec<Event>) -> EventCollection<InMemoryEventStore> {
        let mut collection = EventCollection::new(InMemoryEventStore::with_events(events));
        collection.load().await.unwrap();
        collection
    }

    #[tokio::test]
    async fn new_collection_is_empty() {
        let collection = EventCollection::new(InMemoryEventStore::new());

        assert!(collection.is_empty());
        assert_eq!(collection.all(), &[] as &[Event]);
    }

    #[tokio::test]
    async fn load_replaces_contents_in_store_order() {
        let collection = loaded(vec![event(3, "C"), event(1, "A"), event(2, "B")]).await;

        let ids: Vec<u64> = collection.all().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn failed_load_keeps_prior_contents() {
        let mut collection = loaded(vec![event(1, "A")]).await;
        collection.store().set_offline(true);

        let result = collection.load().await;

        assert!(result.is_err());
        assert_eq!(collection.all(), &[event(1, "A")]);
    }

    #[tokio::test]
    async fn create_appends_the_returned_record() {
        let mut mock = MockRemoteEventStore::new();
        mock.expect_create()
            .times(1)
            .returning(|draft| Ok(Event::from_draft(EventId(2), draft.clone())));
        let mut collection = EventCollection::new(mock);

        let draft = EventDraft::new("B", "2024-02-01", "2024-02-02");
        let created = collection.create(&draft).await.unwrap();

        let expected = Event {
            id: EventId(2),
            event_name: "B".to_string(),
            start_date: "2024-02-01".to_string(),
            end_date: "2024-02-02".to_string(),
        };
        assert_eq!(created, expected);
        assert_eq!(collection.all(), &[expected]);
    }

    #[tokio::test]
    async fn failed_create_leaves_collection_unchanged() {
        let mut collection = loaded(vec![event(1, "A")]).await;
        collection.store().set_offline(true);

        let result = collection.create(&EventDraft::new("B", "2024-02-01", "2024-02-02")).await;

        assert!(result.is_err());
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn create_with_duplicate_id_replaces_instead_of_duplicating() {
        let mut mock = MockRemoteEventStore::new();
        mock.expect_list().returning(|| Ok(vec![event(1, "A")]));
        mock.expect_create()
            .returning(|draft| Ok(Event::from_draft(EventId(1), draft.clone())));
        let mut collection = EventCollection::new(mock);
        collection.load().await.unwrap();

        collection.create(&EventDraft::new("Z", "2024-01-01", "2024-01-01")).await.unwrap();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.all()[0].event_name, "Z");
    }

    #[tokio::test]
    async fn remove_drops_the_matching_record() {
        let mut collection = loaded(vec![event(1, "A")]).await;

        collection.remove(EventId(1)).await.unwrap();

        assert!(collection.is_empty());
    }

    #[tokio::test]
    async fn remove_of_absent_id_acknowledged_by_store_is_a_no_op() {
        let mut mock = MockRemoteEventStore::new();
        mock.expect_list().returning(|| Ok(vec![event(1, "A")]));
        mock.expect_remove().returning(|_| Ok(serde_json::json!({})));
        let mut collection = EventCollection::new(mock);
        collection.load().await.unwrap();

        collection.remove(EventId(42)).await.unwrap();

        assert_eq!(collection.all(), &[event(1, "A")]);
    }

    #[tokio::test]
    async fn failed_remove_keeps_the_record() {
        let mut collection = loaded(vec![event(1, "A")]).await;
        collection.store().set_offline(true);

        let result = collection.remove(EventId(1)).await;

        assert!(result.is_err());
        assert_eq!(collection.all(), &[event(1, "A")]);
    }

    #[tokio::test]
    async fn edit_replaces_in_place() {
        let mut collection = loaded(vec![event(1, "A"), event(2, "B"), event(3, "C")]).await;

        let draft = EventDraft::new("B2", "2024-05-01", "2024-05-03");
        collection.edit(EventId(2), &draft).await.unwrap();

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.all()[1], Event::from_draft(EventId(2), draft));
        assert_eq!(collection.all()[0].event_name, "A");
        assert_eq!(collection.all()[2].event_name, "C");
    }

    #[tokio::test]
    async fn failed_edit_keeps_the_old_values() {
        let mut collection = loaded(vec![event(1, "A")]).await;
        collection.store().set_offline(true);

        let result = collection.edit(EventId(1), &EventDraft::new("X", "2024-01-01", "2024-01-01")).await;

        assert!(result.is_err());
        assert_eq!(collection.all(), &[event(1, "A")]);
    }

    #[tokio::test]
    async fn edit_answered_with_another_id_is_rejected() {
        let mut mock = MockRemoteEventStore::new();
        mock.expect_list().returning(|| Ok(vec![event(1, "A"), event(2, "B")]));
        mock.expect_update()
            .returning(|_, draft| Ok(Event::from_draft(EventId(2), draft.clone())));
        let mut collection = EventCollection::new(mock);
        collection.load().await.unwrap();

        let result = collection.edit(EventId(1), &EventDraft::new("X", "2024-01-01", "2024-01-01")).await;

        assert!(matches!(
            result,
            Err(RemoteError::MismatchedId { requested: EventId(1), returned: EventId(2) })
        ));
        assert_eq!(collection.all(), &[event(1, "A"), event(2, "B")]);
    }

    #[tokio::test]
    async fn find_by_id_accepts_numeric_and_textual_ids() {
        let collection = loaded(vec![event(1, "A"), event(7, "G")]).await;

        assert_eq!(collection.find_by_id(7u64), Some(&event(7, "G")));
        assert_eq!(collection.find_by_id("7"), Some(&event(7, "G")));
        assert_eq!(collection.find_by_id(EventId(1)), Some(&event(1, "A")));
        assert_eq!(collection.find_by_id("8"), None);
        assert_eq!(collection.find_by_id("seven"), None);
    }

    fn names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[A-Za-z]{1,8}", 0..12)
    }

    proptest! {
        #[test]
        fn creates_grow_by_one_with_unique_ids(seed in names(), extra in names()) {
            tokio_test::block_on(async {
                let seeded = seed.iter().enumerate()
                    .map(|(i, name)| event(i as u64 + 1, name))
                    .collect();
                let mut collection = loaded(seeded).await;

                for name in &extra {
                    let before = collection.len();
                    let created = collection
                        .create(&EventDraft::new(name.clone(), "2024-01-01", "2024-01-01"))
                        .await
                        .unwrap();

                    prop_assert_eq!(collection.len(), before + 1);
                    let same_id = collection.all().iter().filter(|e| e.id == created.id).count();
                    prop_assert_eq!(same_id, 1);
                }
                Ok::<(), TestCaseError>(())
            })?;
        }

        #[test]
        fn removing_existing_ids_shrinks_by_one(count in 1usize..10, pick in 0usize..10) {
            tokio_test::block_on(async {
                let seeded = (1..=count as u64).map(|i| event(i, "E")).collect();
                let mut collection = loaded(seeded).await;
                let target = EventId((pick % count) as u64 + 1);

                collection.remove(target).await.unwrap();

                prop_assert_eq!(collection.len(), count - 1);
                prop_assert!(collection.find_by_id(target).is_none());
                Ok::<(), TestCaseError>(())
            })?;
        }

        #[test]
        fn find_by_id_agrees_for_text_and_number(count in 0usize..10, probe in 0u64..20) {
            tokio_test::block_on(async {
                let seeded = (1..=count as u64).map(|i| event(i, "E")).collect();
                let collection = loaded(seeded).await;

                let by_number = collection.find_by_id(probe).cloned();
                let by_text = collection.find_by_id(probe.to_string()).cloned();

                prop_assert_eq!(&by_number, &by_text);
                prop_assert_eq!(by_number.is_some(), probe >= 1 && probe <= count as u64);
                Ok::<(), TestCaseError>(())
            })?;
        }
    }
}
