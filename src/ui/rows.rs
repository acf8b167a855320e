use crate::events::{DraftField, Event, EventDraft, EventId};

/// Identity of a row on a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Event(EventId),
    /// The single placeholder for a record that does not exist yet.
    Draft,
}

impl RowKey {
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            RowKey::Event(id) => Some(*id),
            RowKey::Draft => None,
        }
    }
}

impl From<EventId> for RowKey {
    fn from(id: EventId) -> Self {
        RowKey::Event(id)
    }
}

/// A transient editable row standing in for a record during add or edit.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub draft: EventDraft,
    pub active_field: DraftField,
    pub editing: Option<EventId>,
    pub error: Option<String>,
}

impl Placeholder {
    pub fn new(draft: EventDraft) -> Self {
        Self {
            draft,
            active_field: DraftField::EventName,
            editing: None,
            error: None,
        }
    }

    pub fn for_event(event: &Event) -> Self {
        Self {
            editing: Some(event.id),
            ..Self::new(event.to_draft())
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn key(&self) -> RowKey {
        self.editing.map(RowKey::Event).unwrap_or(RowKey::Draft)
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            DraftField::EventName => DraftField::StartDate,
            DraftField::StartDate => DraftField::EndDate,
            DraftField::EndDate => DraftField::EventName,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            DraftField::EventName => DraftField::EndDate,
            DraftField::StartDate => DraftField::EventName,
            DraftField::EndDate => DraftField::StartDate,
        };
    }

    pub fn push_char(&mut self, c: char) {
        let accepts = match self.active_field {
            DraftField::EventName => true,
            DraftField::StartDate | DraftField::EndDate => c.is_ascii_digit() || c == '-',
        };
        if accepts {
            self.draft.field_mut(self.active_field).push(c);
            self.error = None;
        }
    }

    pub fn pop_char(&mut self) {
        self.draft.field_mut(self.active_field).pop();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowContent {
    Display(Event),
    Editable(Placeholder),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: RowKey,
    pub content: RowContent,
}

impl Row {
    pub fn display(event: Event) -> Self {
        Self {
            key: RowKey::Event(event.id),
            content: RowContent::Display(event),
        }
    }

    pub fn editable(placeholder: Placeholder) -> Self {
        Self {
            key: placeholder.key(),
            content: RowContent::Editable(placeholder),
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.content, RowContent::Editable(_))
    }
}
