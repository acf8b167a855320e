use crate::events::EventId;
use crate::sync::controller::RowAction;
use crate::ui::rows::RowKey;
use crate::ui::surface::RowProjection;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Error(String),
}

/// Something the session loop has to carry out against the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Dispatch(RowKey, RowAction),
    Reload,
    Quit,
}

/// Terminal-side state. Records live in the controller; this only tracks
/// where the user is and what they are doing.
pub struct AppState {
    pub mode: Mode,
    pub selected_row: usize,
    pub editing_row: Option<RowKey>,
    pub delete_confirmation_event_id: Option<EventId>,
    pub command_buffer: String,
    pub sync_status: SyncStatus,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            selected_row: 0,
            editing_row: None,
            delete_confirmation_event_id: None,
            command_buffer: String::new(),
            sync_status: SyncStatus::Synced,
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn selected_key(&self, rows: &RowProjection) -> Option<RowKey> {
        rows.get(self.selected_row).map(|row| row.key)
    }

    pub fn select_key(&mut self, rows: &RowProjection, key: RowKey) {
        if let Some(index) = rows.position(key) {
            self.selected_row = index;
        }
    }

    pub fn move_selection_down(&mut self, row_count: usize) {
        if row_count > 0 && self.selected_row < row_count - 1 {
            self.selected_row += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self, row_count: usize) {
        self.selected_row = self.selected_row.min(row_count.saturating_sub(1));
    }

    pub fn start_editing(&mut self, rows: &RowProjection, key: RowKey) {
        self.select_key(rows, key);
        self.editing_row = Some(key);
        self.mode = Mode::Insert;
    }

    pub fn stop_editing(&mut self) {
        self.editing_row = None;
        self.mode = Mode::Normal;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventDraft};
    use crate::ui::rows::{Placeholder, Row};
    use crate::ui::surface::RenderSurface;

    fn projection(ids: &[u64]) -> RowProjection {
        let mut rows = RowProjection::new();
        rows.render_all(
            ids.iter()
                .map(|id| Row::display(Event::from_draft(EventId(*id), EventDraft::new("E", "2024-01-01", "2024-01-01"))))
                .collect(),
        );
        rows
    }

    #[test]
    fn new_app_starts_in_normal_mode() {
        let app = AppState::new();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn selection_stops_at_last_row() {
        let mut app = AppState::new();

        app.move_selection_down(2);
        app.move_selection_down(2);

        assert_eq!(app.selected_row, 1);
    }

    #[test]
    fn selection_stops_at_first_row() {
        let mut app = AppState::new();

        app.move_selection_up();

        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn clamp_follows_shrinking_table() {
        let mut app = AppState::new();
        app.selected_row = 4;

        app.clamp_selection(2);

        assert_eq!(app.selected_row, 1);
    }

    #[test]
    fn start_editing_selects_the_placeholder_row() {
        let mut rows = projection(&[1, 2]);
        rows.insert(Row::editable(Placeholder::new(EventDraft::default())));
        let mut app = AppState::new();

        app.start_editing(&rows, RowKey::Draft);

        assert_eq!(app.mode, Mode::Insert);
        assert_eq!(app.selected_row, 2);
        assert_eq!(app.selected_key(&rows), Some(RowKey::Draft));
    }
}
