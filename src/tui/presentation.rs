use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use event_desk::{
    app::{AppState, Mode, SyncStatus},
    ui::surface::RowProjection,
};
use crate::tui::{dialogs, event_table};

pub fn ui(f: &mut Frame, app: &AppState, rows: &RowProjection) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let title_text = format!("event-desk - {:?} Mode", app.mode);

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    event_table::render(f, app, rows, chunks[1]);

    let (status_text, status_color) = status_line(app, rows);

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.delete_confirmation_event_id.is_some() {
        dialogs::delete_confirmation::render(f, app, rows);
    }
}

fn status_line(app: &AppState, rows: &RowProjection) -> (String, ratatui::style::Color) {
    if matches!(app.mode, Mode::Command) {
        return (app.command_buffer.clone(), app.theme.command_mode);
    }

    match &app.sync_status {
        SyncStatus::Error(message) => (format!("Error: {}", message), app.theme.error),
        SyncStatus::Syncing => ("Syncing...".to_string(), app.theme.status_bar),
        SyncStatus::Synced if matches!(app.mode, Mode::Insert) => (
            "Tab = Next field | Enter = Save | Esc = Cancel".to_string(),
            app.theme.status_bar,
        ),
        SyncStatus::Synced => (
            format!("Rows: {} | Press 'a' to add, 'q' to quit, '?' for help", rows.len()),
            app.theme.success,
        ),
    }
}
