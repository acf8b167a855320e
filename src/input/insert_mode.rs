use crossterm::event::KeyCode;

use crate::ui::rows::Placeholder;

/// Field editing inside an open placeholder. Enter and Esc belong to the
/// session, which turns them into save and cancel.
pub fn handle_key(key: KeyCode, placeholder: &mut Placeholder) {
    match key {
        KeyCode::Tab => placeholder.next_field(),
        KeyCode::BackTab => placeholder.prev_field(),
        KeyCode::Backspace => placeholder.pop_char(),
        KeyCode::Char(c) => placeholder.push_char(c),
        _ => {}
    }
}
