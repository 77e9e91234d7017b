use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::models::MonthKey;
use crate::state::AppState;
use crate::storage::KeyValueStore;
use crate::ui::app::{App, EditTarget, InputMode, Screen, SettingsRow};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// Longest the loop sleeps when no save is due.
const IDLE_POLL: Duration = Duration::from_millis(500);

pub(crate) fn as_tui(store: &dyn KeyValueStore, config: &Config) -> Result<()> {
    let mut state = AppState::load(store, config, MonthKey::current());
    let mut app = App::new();
    app.refresh_month_totals(&state.budget, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &mut state, store);

    // Pending edits are written even when the loop failed
    state.shutdown(store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %format!("{e:#}"), "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, state);
        })?;

        let timeout = state
            .budget
            .next_deadline()
            .map_or(IDLE_POLL, |due| due.saturating_duration_since(Instant::now()))
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, state, store)?;
                }
            }
        }

        state.budget.tick(Instant::now(), store);
    }
    Ok(())
}

fn handle_key(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, state, store)?,
        InputMode::Command => handle_command_input(key, app, state, store)?,
        InputMode::Editing => handle_editing_input(key, app, state, store),
        InputMode::Confirm => handle_confirm_input(key, app, state),
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app, state),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app, state),
        KeyCode::Char('1') => commands::switch_screen(app, state, store, Screen::Home),
        KeyCode::Char('2') => commands::switch_screen(app, state, store, Screen::Budget),
        KeyCode::Char('3') => commands::switch_screen(app, state, store, Screen::Data),
        KeyCode::Char('4') => commands::switch_screen(app, state, store, Screen::Settings),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            commands::switch_screen(app, state, store, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 {
                screens.len() - 1
            } else {
                idx - 1
            };
            commands::switch_screen(app, state, store, screens[prev]);
        }
        KeyCode::Char('H') => commands::handle_command("prev-month", app, state, store)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app, state, store)?,
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        KeyCode::Char('R') => commands::handle_command("reset-all", app, state, store)?,
        _ => match app.screen {
            Screen::Home => handle_home_key(key, app, state, store)?,
            Screen::Budget => handle_budget_key(key, app, state, store)?,
            Screen::Data => handle_data_key(key, app, state, store)?,
            Screen::Settings => handle_settings_key(key, app, state, store)?,
        },
    }
    Ok(())
}

fn handle_home_key(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> Result<()> {
    if key.code == KeyCode::Char('D') {
        commands::handle_command("delete-txn", app, state, store)?;
    }
    Ok(())
}

fn handle_budget_key(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> Result<()> {
    match key.code {
        KeyCode::Char('b') => {
            let current = state.budget.total_budget().to_string();
            app.begin_edit(EditTarget::TotalBudget, current);
        }
        KeyCode::Char('e') => {
            if let Some(cat) = app
                .selected_category(state)
                .and_then(|id| state.budget.category(id))
            {
                app.begin_edit(EditTarget::CategoryBudget(cat.id), cat.budget.to_string());
            }
        }
        KeyCode::Char('a') | KeyCode::Enter => {
            if let Some(cat) = app
                .selected_category(state)
                .and_then(|id| state.budget.category(id))
            {
                app.begin_edit(EditTarget::AddTransaction(cat.id), String::new());
                app.set_status(format!("Adding to {}: <amount> [description]", cat.name));
            }
        }
        KeyCode::Char('r') => commands::handle_command("reset", app, state, store)?,
        _ => {}
    }
    Ok(())
}

fn handle_data_key(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> Result<()> {
    match key.code {
        KeyCode::Char('p') => commands::handle_command("report", app, state, store)?,
        KeyCode::Char('x') => commands::handle_command("export", app, state, store)?,
        _ => {}
    }
    Ok(())
}

fn handle_settings_key(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => match app.selected_settings_row() {
            Some(SettingsRow::Currency) => commands::handle_command("currency", app, state, store)?,
            Some(SettingsRow::Language) => commands::handle_command("language", app, state, store)?,
            Some(SettingsRow::DarkMode) => commands::handle_command("theme", app, state, store)?,
            None => {}
        },
        KeyCode::Char('c') => {
            let current = state.budget.currency_symbol().to_string();
            app.begin_edit(EditTarget::CurrencySymbol, current);
        }
        KeyCode::Char('n') => app.begin_edit(EditTarget::NewCategory, String::new()),
        KeyCode::Char('e') => commands::handle_command("rename", app, state, store)?,
        KeyCode::Char('D') => commands::handle_command("delete-category", app, state, store)?,
        _ => {}
    }
    Ok(())
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, state, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(
    key: event::KeyEvent,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            if let Some(target) = app.edit_target.take() {
                commands::apply_edit(target, &input, app, state, store);
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.edit_target = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, state: &mut AppState) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                commands::apply_pending(action, app, state);
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn settings_len(state: &AppState) -> usize {
    SettingsRow::ALL.len() + state.budget.categories().len()
}

fn handle_move_down(app: &mut App, state: &AppState) {
    match app.screen {
        Screen::Home => {
            let len = state.budget.recent_transactions().len();
            let page = app.transaction_page();
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Budget => {
            let len = state.budget.categories().len();
            let page = app.category_page();
            scroll_down(&mut app.category_index, &mut app.category_scroll, len, page);
        }
        Screen::Settings => {
            if app.settings_index + 1 < settings_len(state) {
                app.settings_index += 1;
            }
        }
        Screen::Data => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Home => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Budget => scroll_up(&mut app.category_index, &mut app.category_scroll),
        Screen::Settings => app.settings_index = app.settings_index.saturating_sub(1),
        Screen::Data => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Home => scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Budget => scroll_to_top(&mut app.category_index, &mut app.category_scroll),
        Screen::Settings => app.settings_index = 0,
        Screen::Data => {}
    }
}

fn handle_goto_bottom(app: &mut App, state: &AppState) {
    match app.screen {
        Screen::Home => {
            let len = state.budget.recent_transactions().len();
            let page = app.transaction_page();
            scroll_to_bottom(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        Screen::Budget => {
            let len = state.budget.categories().len();
            let page = app.category_page();
            scroll_to_bottom(&mut app.category_index, &mut app.category_scroll, len, page);
        }
        Screen::Settings => app.settings_index = settings_len(state).saturating_sub(1),
        Screen::Data => {}
    }
}
