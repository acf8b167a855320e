pub mod event;
pub mod collection;

pub use event::{AsEventId, DraftField, Event, EventDraft, EventId, ValidationError};
pub use collection::EventCollection;
