use crossterm::event::KeyCode;

use crate::app::{AppState, Intent, Mode};
use crate::sync::controller::RowAction;
use crate::ui::rows::RowKey;
use crate::ui::surface::RowProjection;

pub fn handle_key(key: KeyCode, state: &mut AppState, rows: &RowProjection) -> Option<Intent> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => {
            state.move_selection_down(rows.len());
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.move_selection_up();
            None
        }
        KeyCode::Char('g') => {
            state.selected_row = 0;
            None
        }
        KeyCode::Char('G') => {
            state.selected_row = rows.len().saturating_sub(1);
            None
        }
        KeyCode::Char('a') => Some(Intent::Dispatch(RowKey::Draft, RowAction::Add)),
        KeyCode::Char('E') | KeyCode::Enter => edit_selected_row(state, rows),
        KeyCode::Char('x') => {
            request_delete(state, rows);
            None
        }
        KeyCode::Char('r') => Some(Intent::Reload),
        KeyCode::Char(':') => {
            state.command_buffer = ":".to_string();
            state.mode = Mode::Command;
            None
        }
        KeyCode::Char('?') => {
            state.show_help = true;
            None
        }
        KeyCode::Char('q') => Some(Intent::Quit),
        _ => None,
    }
}

fn edit_selected_row(state: &mut AppState, rows: &RowProjection) -> Option<Intent> {
    let row = rows.get(state.selected_row)?;

    // An open placeholder is resumed rather than reopened.
    if row.is_editable() {
        state.start_editing(rows, row.key);
        return None;
    }

    Some(Intent::Dispatch(row.key, RowAction::Edit))
}

fn request_delete(state: &mut AppState, rows: &RowProjection) {
    if let Some(id) = state.selected_key(rows).and_then(|key| key.event_id()) {
        state.delete_confirmation_event_id = Some(id);
        state.mode = Mode::Confirm;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventDraft, EventId};
    use crate::ui::rows::{Placeholder, Row};
    use crate::ui::surface::RenderSurface;

    fn rows_with(ids: &[u64]) -> RowProjection {
        let mut rows = RowProjection::new();
        rows.render_all(
            ids.iter()
                .map(|id| Row::display(Event::from_draft(EventId(*id), EventDraft::new("E", "2024-01-01", "2024-01-02"))))
                .collect(),
        );
        rows
    }

    #[test]
    fn j_and_k_move_the_selection() {
        let rows = rows_with(&[1, 2, 3]);
        let mut state = AppState::new();

        handle_key(KeyCode::Char('j'), &mut state, &rows);
        handle_key(KeyCode::Char('j'), &mut state, &rows);
        handle_key(KeyCode::Char('k'), &mut state, &rows);

        assert_eq!(state.selected_row, 1);
    }

    #[test]
    fn a_requests_a_new_placeholder() {
        let rows = rows_with(&[]);
        let mut state = AppState::new();

        let intent = handle_key(KeyCode::Char('a'), &mut state, &rows);

        assert_eq!(intent, Some(Intent::Dispatch(RowKey::Draft, RowAction::Add)));
    }

    #[test]
    fn e_requests_edit_of_selected_record() {
        let rows = rows_with(&[4, 9]);
        let mut state = AppState::new();
        state.selected_row = 1;

        let intent = handle_key(KeyCode::Char('E'), &mut state, &rows);

        assert_eq!(intent, Some(Intent::Dispatch(RowKey::Event(EventId(9)), RowAction::Edit)));
    }

    #[test]
    fn enter_on_open_placeholder_resumes_editing() {
        let mut rows = rows_with(&[1]);
        rows.insert(Row::editable(Placeholder::new(EventDraft::default())));
        let mut state = AppState::new();
        state.selected_row = 1;

        let intent = handle_key(KeyCode::Enter, &mut state, &rows);

        assert_eq!(intent, None);
        assert_eq!(state.mode, Mode::Insert);
        assert_eq!(state.editing_row, Some(RowKey::Draft));
    }

    #[test]
    fn x_asks_for_confirmation() {
        let rows = rows_with(&[7]);
        let mut state = AppState::new();

        handle_key(KeyCode::Char('x'), &mut state, &rows);

        assert_eq!(state.mode, Mode::Confirm);
        assert_eq!(state.delete_confirmation_event_id, Some(EventId(7)));
    }

    #[test]
    fn x_on_empty_table_does_nothing() {
        let rows = rows_with(&[]);
        let mut state = AppState::new();

        handle_key(KeyCode::Char('x'), &mut state, &rows);

        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn colon_enters_command_mode() {
        let rows = rows_with(&[]);
        let mut state = AppState::new();

        handle_key(KeyCode::Char(':'), &mut state, &rows);

        assert_eq!(state.mode, Mode::Command);
        assert_eq!(state.command_buffer, ":");
    }
}
