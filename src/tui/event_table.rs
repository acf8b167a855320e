use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};
use event_desk::{
    app::{AppState, Mode},
    events::{DraftField, Event},
    ui::{
        rows::{Placeholder, RowContent},
        surface::RowProjection,
    },
};

const DAY_FORMAT: &str = "%a %b %d, %Y";

pub fn render(f: &mut Frame, app: &AppState, rows: &RowProjection, area: Rect) {
    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![Span::styled("No events", Style::default().fg(Color::DarkGray))]),
            Line::from(""),
            Line::from(vec![
                Span::styled("a", Style::default().fg(Color::Green)),
                Span::raw(" = Add event | "),
                Span::styled("r", Style::default().fg(Color::Cyan)),
                Span::raw(" = Reload"),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Events "));
        f.render_widget(empty, area);
        return;
    }

    let header = TableRow::new(vec!["ID", "Event", "Start", "End", "Days"])
        .style(Style::default().fg(app.theme.header).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let body: Vec<TableRow> = rows
        .rows()
        .iter()
        .map(|row| match &row.content {
            RowContent::Display(event) => display_row(app, event),
            RowContent::Editable(placeholder) => editable_row(app, placeholder),
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(40),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(6),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Events "))
        .highlight_style(Style::default().bg(app.theme.selected_bg).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
}

fn display_row<'a>(app: &AppState, event: &'a Event) -> TableRow<'a> {
    let start = event.start().map(|d| d.format(DAY_FORMAT).to_string()).unwrap_or_else(|| event.start_date.clone());
    let end = event.end().map(|d| d.format(DAY_FORMAT).to_string()).unwrap_or_else(|| event.end_date.clone());
    let days = event.duration_days().map(|d| d.to_string()).unwrap_or_default();

    TableRow::new(vec![
        Cell::from(event.id.to_string()),
        Cell::from(event.event_name.as_str()),
        Cell::from(start).style(Style::default().fg(app.theme.dates)),
        Cell::from(end).style(Style::default().fg(app.theme.dates)),
        Cell::from(days),
    ])
}

fn editable_row<'a>(app: &AppState, placeholder: &'a Placeholder) -> TableRow<'a> {
    let editing_here = matches!(app.mode, Mode::Insert) && app.editing_row == Some(placeholder.key());
    let marker = if placeholder.is_editing() { "✎" } else { "+" };

    let field_cell = |field: DraftField| {
        let value = placeholder.draft.field(field);
        let active = editing_here && placeholder.active_field == field;
        let (text, style) = if active {
            (format!("{}_", value), Style::default().fg(Color::Black).bg(app.theme.active_field))
        } else if value.is_empty() {
            (format!("<{}>", field.label()), Style::default().fg(Color::DarkGray))
        } else {
            (value.to_string(), Style::default().fg(app.theme.placeholder))
        };
        Cell::from(text).style(style)
    };

    let status = match &placeholder.error {
        Some(_) => Cell::from("!").style(Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD)),
        None => Cell::from(""),
    };

    TableRow::new(vec![
        Cell::from(marker).style(Style::default().fg(app.theme.placeholder)),
        field_cell(DraftField::EventName),
        field_cell(DraftField::StartDate),
        field_cell(DraftField::EndDate),
        status,
    ])
}
