use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use event_desk::{
    app::{AppState, Intent, Mode, SyncStatus},
    events::EventDraft,
    input::{command_mode, insert_mode, normal_mode},
    storage::config::Config,
    sync::{
        controller::{FlowError, Outcome, RowAction, SyncController},
        event_api::RemoteEventStore,
    },
    ui::{rows::RowKey, surface::RowProjection, theme::Theme},
};
use crate::tui::presentation::ui;

type Controller<S> = SyncController<S, RowProjection>;

pub async fn run_tui<S: RemoteEventStore>(store: S, config: &Config) -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new().with_theme(theme);
    let mut controller = SyncController::new(store, RowProjection::new());

    app.sync_status = SyncStatus::Syncing;
    terminal.draw(|f| ui(f, &app, controller.surface())).ok();

    match controller.start().await {
        Ok(count) => {
            tracing::info!("Showing {} events", count);
            app.sync_status = SyncStatus::Synced;
        }
        Err(e) => {
            app.sync_status = SyncStatus::Error(format!("Load failed: {}", e));
        }
    }

    let res = run_app(&mut terminal, &mut app, &mut controller).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: Backend, S: RemoteEventStore>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    controller: &mut Controller<S>,
) -> io::Result<()> {
    loop {
        app.clamp_selection(controller.surface().len());
        terminal.draw(|f| ui(f, app, controller.surface()))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let intent = match app.mode {
                Mode::Normal => {
                    if app.show_help {
                        handle_help_keys(key.code, app);
                        None
                    } else {
                        normal_mode::handle_key(key.code, app, controller.surface())
                    }
                }
                Mode::Command => handle_command_mode(key.code, app, controller),
                Mode::Insert => handle_insert_mode(key.code, app, controller),
                Mode::Confirm => handle_delete_confirmation(key.code, app),
            };

            if let Some(intent) = intent
                && execute_intent(intent, app, terminal, controller).await?
            {
                return Ok(());
            }
        }
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn handle_command_mode<S: RemoteEventStore>(
    code: KeyCode,
    app: &mut AppState,
    controller: &mut Controller<S>,
) -> Option<Intent> {
    match code {
        KeyCode::Enter => {
            let cmd = command_mode::parse_command(&app.command_buffer);
            app.command_buffer.clear();
            app.mode = Mode::Normal;

            match cmd {
                command_mode::Command::Quit => Some(Intent::Quit),
                command_mode::Command::Reload => Some(Intent::Reload),
                command_mode::Command::Help => {
                    app.show_help = !app.show_help;
                    None
                }
                command_mode::Command::Theme(theme_name) => {
                    app.theme = Theme::get_by_name(&theme_name);
                    None
                }
                command_mode::Command::NewEvent(name) => {
                    open_new_event(name, app, controller);
                    None
                }
                command_mode::Command::Edit(id) => Some(Intent::Dispatch(RowKey::Event(id), RowAction::Edit)),
                command_mode::Command::Delete(id) => {
                    if controller.collection().find_by_id(id).is_some() {
                        app.delete_confirmation_event_id = Some(id);
                        app.mode = Mode::Confirm;
                    } else {
                        app.sync_status = SyncStatus::Error(format!("Event not found: {}", id));
                    }
                    None
                }
                command_mode::Command::Error(message) => {
                    app.sync_status = SyncStatus::Error(message);
                    None
                }
            }
        }
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            None
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            if app.command_buffer.is_empty() {
                app.mode = Mode::Normal;
            }
            None
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            None
        }
        _ => None,
    }
}

/// Opens the add row. A name given while one is already open is copied
/// into that pending draft.
fn open_new_event<S: RemoteEventStore>(
    name: Option<String>,
    app: &mut AppState,
    controller: &mut Controller<S>,
) {
    let draft = EventDraft {
        event_name: name.clone().unwrap_or_default(),
        ..EventDraft::default()
    };
    match controller.begin_add(draft) {
        Ok(_) => app.start_editing(controller.surface(), RowKey::Draft),
        Err(FlowError::PlaceholderPending(pending)) => {
            if let Some(name) = name {
                controller.update_placeholder(pending, |placeholder| placeholder.draft.event_name = name);
            }
            app.start_editing(controller.surface(), pending);
        }
        Err(e) => app.sync_status = SyncStatus::Error(e.to_string()),
    }
}

fn handle_insert_mode<S: RemoteEventStore>(
    code: KeyCode,
    app: &mut AppState,
    controller: &mut Controller<S>,
) -> Option<Intent> {
    let Some(key) = app.editing_row else {
        app.mode = Mode::Normal;
        return None;
    };

    match code {
        KeyCode::Esc => Some(Intent::Dispatch(key, RowAction::Cancel)),
        KeyCode::Enter => Some(Intent::Dispatch(key, RowAction::Save)),
        _ => {
            controller.update_placeholder(key, |placeholder| insert_mode::handle_key(code, placeholder));
            None
        }
    }
}

fn handle_delete_confirmation(code: KeyCode, app: &mut AppState) -> Option<Intent> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.mode = Mode::Normal;
            app.delete_confirmation_event_id
                .take()
                .map(|id| Intent::Dispatch(RowKey::Event(id), RowAction::Delete))
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.delete_confirmation_event_id = None;
            app.mode = Mode::Normal;
            None
        }
        _ => None,
    }
}

/// Runs an intent against the controller. Returns true when the session
/// should end.
async fn execute_intent<B: Backend, S: RemoteEventStore>(
    intent: Intent,
    app: &mut AppState,
    terminal: &mut Terminal<B>,
    controller: &mut Controller<S>,
) -> io::Result<bool> {
    let (key, action) = match intent {
        Intent::Quit => return Ok(true),
        Intent::Reload => {
            app.sync_status = SyncStatus::Syncing;
            terminal.draw(|f| ui(f, app, controller.surface()))?;

            app.sync_status = match controller.reload().await {
                Ok(_) => SyncStatus::Synced,
                Err(e) => SyncStatus::Error(format!("Reload failed: {}", e)),
            };
            return Ok(false);
        }
        Intent::Dispatch(key, action) => (key, action),
    };

    if matches!(action, RowAction::Save | RowAction::Delete) {
        app.sync_status = SyncStatus::Syncing;
        terminal.draw(|f| ui(f, app, controller.surface()))?;
    }

    let result = controller.dispatch(key, action).await;
    apply_outcome(result, key, action, app, controller.surface());

    Ok(false)
}

fn apply_outcome(
    result: Result<Outcome, FlowError>,
    key: RowKey,
    action: RowAction,
    app: &mut AppState,
    rows: &RowProjection,
) {
    match result {
        Ok(Outcome::PlaceholderShown(shown)) => {
            app.start_editing(rows, shown);
        }
        Ok(Outcome::Created(event)) => {
            tracing::info!("Created event {}", event.id);
            app.stop_editing();
            app.select_key(rows, RowKey::Event(event.id));
            app.sync_status = SyncStatus::Synced;
        }
        Ok(Outcome::Updated(event)) => {
            tracing::info!("Updated event {}", event.id);
            app.stop_editing();
            app.sync_status = SyncStatus::Synced;
        }
        Ok(Outcome::Deleted(id)) => {
            tracing::info!("Deleted event {}", id);
            app.sync_status = SyncStatus::Synced;
        }
        Ok(Outcome::Cancelled(_)) => {
            app.stop_editing();
            app.sync_status = SyncStatus::Synced;
        }
        Err(FlowError::PlaceholderPending(pending)) => {
            app.start_editing(rows, pending);
        }
        Err(e) => {
            tracing::error!("{:?} on {:?} failed: {}", action, key, e);
            app.sync_status = SyncStatus::Error(e.to_string());
        }
    }
}
