use std::collections::HashMap;

use thiserror::Error;

use crate::events::{Event, EventCollection, EventDraft, EventId, ValidationError};
use crate::sync::event_api::{RemoteError, RemoteEventStore};
use crate::ui::rows::{Placeholder, Row, RowKey};
use crate::ui::surface::RenderSurface;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteError),
    #[error("Event not found: {0}")]
    UnknownEvent(EventId),
    #[error("No placeholder open for {0:?}")]
    NoPlaceholder(RowKey),
    #[error("A placeholder is already open for {0:?}")]
    PlaceholderPending(RowKey),
    #[error("{action:?} is not available on {key:?}")]
    UnsupportedAction { key: RowKey, action: RowAction },
}

/// What a user asked to do with a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Add,
    Edit,
    Save,
    Cancel,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    PlaceholderShown(RowKey),
    Created(Event),
    Updated(Event),
    Deleted(EventId),
    Cancelled(RowKey),
}

/// Sequences add, edit and delete flows against the collection and keeps the
/// rendering surface in step with it. At most one placeholder per row key.
pub struct SyncController<S, R> {
    collection: EventCollection<S>,
    surface: R,
    placeholders: HashMap<RowKey, Placeholder>,
}

impl<S: RemoteEventStore, R: RenderSurface> SyncController<S, R> {
    pub fn new(store: S, surface: R) -> Self {
        Self {
            collection: EventCollection::new(store),
            surface,
            placeholders: HashMap::new(),
        }
    }

    pub fn collection(&self) -> &EventCollection<S> {
        &self.collection
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn placeholder(&self, key: RowKey) -> Option<&Placeholder> {
        self.placeholders.get(&key)
    }

    pub fn has_placeholder(&self, key: RowKey) -> bool {
        self.placeholders.contains_key(&key)
    }

    pub async fn start(&mut self) -> Result<usize, FlowError> {
        self.reload().await
    }

    /// Loads from the store and redraws. Pending placeholders survive as long
    /// as their record still exists.
    pub async fn reload(&mut self) -> Result<usize, FlowError> {
        let count = self.collection.load().await?.len();

        let ids: Vec<EventId> = self.collection.all().iter().map(|e| e.id).collect();
        self.placeholders.retain(|key, _| match key {
            RowKey::Event(id) => ids.contains(id),
            RowKey::Draft => true,
        });

        let mut rows: Vec<Row> = self.collection
            .all()
            .iter()
            .map(|event| match self.placeholders.get(&RowKey::Event(event.id)) {
                Some(placeholder) => Row::editable(placeholder.clone()),
                None => Row::display(event.clone()),
            })
            .collect();
        if let Some(placeholder) = self.placeholders.get(&RowKey::Draft) {
            rows.push(Row::editable(placeholder.clone()));
        }

        self.surface.render_all(rows);
        Ok(count)
    }

    pub async fn dispatch(&mut self, key: RowKey, action: RowAction) -> Result<Outcome, FlowError> {
        tracing::debug!("Dispatching {:?} on {:?}", action, key);
        match (key, action) {
            (RowKey::Draft, RowAction::Add) => self.begin_add(EventDraft::default()),
            (RowKey::Draft, RowAction::Save) => self.confirm_add().await.map(Outcome::Created),
            (RowKey::Draft, RowAction::Cancel) => self.cancel_add(),
            (RowKey::Event(id), RowAction::Edit) => self.begin_edit(id),
            (RowKey::Event(id), RowAction::Save) => self.confirm_edit(id).await.map(Outcome::Updated),
            (RowKey::Event(id), RowAction::Cancel) => self.cancel_edit(id),
            (RowKey::Event(id), RowAction::Delete) => self.delete(id).await.map(|_| Outcome::Deleted(id)),
            (key, action) => Err(FlowError::UnsupportedAction { key, action }),
        }
    }

    pub fn begin_add(&mut self, draft: EventDraft) -> Result<Outcome, FlowError> {
        if self.placeholders.contains_key(&RowKey::Draft) {
            return Err(FlowError::PlaceholderPending(RowKey::Draft));
        }

        let placeholder = Placeholder::new(draft);
        self.surface.insert(Row::editable(placeholder.clone()));
        self.placeholders.insert(RowKey::Draft, placeholder);
        Ok(Outcome::PlaceholderShown(RowKey::Draft))
    }

    pub async fn confirm_add(&mut self) -> Result<Event, FlowError> {
        let draft = self.pending_draft(RowKey::Draft)?;

        if let Err(e) = draft.validate() {
            tracing::warn!("Rejected new event: {}", e);
            self.flag_placeholder(RowKey::Draft, e.to_string());
            return Err(e.into());
        }

        match self.collection.create(&draft).await {
            Ok(created) => {
                self.placeholders.remove(&RowKey::Draft);
                self.surface.remove(RowKey::Draft);
                self.surface.insert(Row::display(created.clone()));
                Ok(created)
            }
            Err(e) => {
                self.flag_placeholder(RowKey::Draft, e.to_string());
                Err(e.into())
            }
        }
    }

    pub fn cancel_add(&mut self) -> Result<Outcome, FlowError> {
        self.placeholders
            .remove(&RowKey::Draft)
            .ok_or(FlowError::NoPlaceholder(RowKey::Draft))?;
        self.surface.remove(RowKey::Draft);
        Ok(Outcome::Cancelled(RowKey::Draft))
    }

    pub fn begin_edit(&mut self, id: EventId) -> Result<Outcome, FlowError> {
        let key = RowKey::Event(id);
        if self.placeholders.contains_key(&key) {
            return Err(FlowError::PlaceholderPending(key));
        }

        let event = self.collection.find_by_id(id).ok_or(FlowError::UnknownEvent(id))?;
        let placeholder = Placeholder::for_event(event);

        if !self.surface.replace(key, Row::editable(placeholder.clone())) {
            self.surface.insert(Row::editable(placeholder.clone()));
        }
        self.placeholders.insert(key, placeholder);
        Ok(Outcome::PlaceholderShown(key))
    }

    pub async fn confirm_edit(&mut self, id: EventId) -> Result<Event, FlowError> {
        let key = RowKey::Event(id);
        let draft = self.pending_draft(key)?;

        match self.collection.edit(id, &draft).await {
            Ok(updated) => {
                self.placeholders.remove(&key);
                self.surface.replace(key, Row::display(updated.clone()));
                Ok(updated)
            }
            Err(e) => {
                self.flag_placeholder(key, e.to_string());
                Err(e.into())
            }
        }
    }

    /// Restores the record's display row as the collection holds it. The
    /// record is not re-fetched, so a concurrent remote delete goes unnoticed.
    pub fn cancel_edit(&mut self, id: EventId) -> Result<Outcome, FlowError> {
        let key = RowKey::Event(id);
        self.placeholders.remove(&key).ok_or(FlowError::NoPlaceholder(key))?;

        match self.collection.find_by_id(id) {
            Some(event) => {
                self.surface.replace(key, Row::display(event.clone()));
            }
            None => {
                self.surface.remove(key);
            }
        }
        Ok(Outcome::Cancelled(key))
    }

    pub async fn delete(&mut self, id: EventId) -> Result<serde_json::Value, FlowError> {
        if self.collection.find_by_id(id).is_none() {
            return Err(FlowError::UnknownEvent(id));
        }

        let ack = self.collection.remove(id).await?;
        let key = RowKey::Event(id);
        self.placeholders.remove(&key);
        self.surface.remove(key);
        Ok(ack)
    }

    /// Applies `edit` to an open placeholder and redraws its row.
    pub fn update_placeholder(&mut self, key: RowKey, edit: impl FnOnce(&mut Placeholder)) -> bool {
        let Some(placeholder) = self.placeholders.get_mut(&key) else {
            return false;
        };
        edit(placeholder);
        let row = Row::editable(placeholder.clone());
        self.surface.replace(key, row)
    }

    fn pending_draft(&self, key: RowKey) -> Result<EventDraft, FlowError> {
        self.placeholders
            .get(&key)
            .map(|p| p.draft.clone())
            .ok_or(FlowError::NoPlaceholder(key))
    }

    fn flag_placeholder(&mut self, key: RowKey, message: String) {
        self.update_placeholder(key, |p| p.error = Some(message));
    }
}
