pub mod events;
pub mod input;
pub mod ui;
pub mod sync;
pub mod storage;
pub mod app;

pub use events::{Event, EventCollection, EventDraft, EventId};
pub use app::{AppState, Intent, Mode, SyncStatus};
pub use sync::{FlowError, HttpEventStore, InMemoryEventStore, RemoteError, RemoteEventStore, RowAction, SyncController};

pub use input::{normal_mode, command_mode, insert_mode};
