pub mod event_api;
pub mod in_memory;
pub mod controller;

pub use event_api::{HttpEventStore, RemoteError, RemoteEventStore};
pub use in_memory::InMemoryEventStore;
pub use controller::{FlowError, Outcome, RowAction, SyncController};
