mod session;
mod presentation;
mod sample_events;
mod event_table;
mod dialogs;

pub use session::run_tui;
pub use sample_events::sample_store;
