use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme::{self, Palette};
use crate::state::AppState;

pub(crate) fn render(f: &mut Frame, app: &App, state: &AppState) {
    let palette = Palette::for_mode(state.theme.is_dark());
    f.render_widget(Block::default().style(palette.base_style()), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app, state, &palette);
    render_screen(f, chunks[1], app, state, &palette);
    render_status_bar(f, chunks[2], app, state, &palette);
    render_command_bar(f, chunks[3], app, &palette);

    if app.show_help {
        render_help_overlay(f, f.area(), &palette);
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            let label = state.locale.t(s.label_key());
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), palette.dim_style()),
                    Span::styled(
                        label.to_string(),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{label}"), palette.dim_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", palette.border_style()))
        .style(palette.header_style());

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    match app.screen {
        Screen::Home => super::screens::home::render(f, area, app, state, palette),
        Screen::Budget => super::screens::budget::render(f, area, app, state, palette),
        Screen::Data => super::screens::data::render(f, area, app, state, palette),
        Screen::Settings => super::screens::settings::render(f, area, app, state, palette),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(palette.background)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let saving = if state.budget.has_pending_write() { " | saving…" } else { "" };
    let info = format!(
        " {} | {} | {}{saving}",
        app.screen,
        state.budget.month().label(),
        state.budget.currency_symbol(),
    );

    let right = match app.screen {
        Screen::Home => " H/L month | D delete | ? help ",
        Screen::Budget => " b total | e limit | a add | r reset | ? help ",
        Screen::Data => " p report | x csv | ? help ",
        Screen::Settings => " Enter change | n new | e rename | D delete ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, palette.status_bar_style()),
        Span::styled(" ".repeat(pad), palette.status_bar_style()),
        Span::styled(right, palette.status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, palette.command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Editing => {
            let prompt = app.edit_target.as_ref().map_or("edit> ", |t| t.prompt());
            (
                Line::from(vec![
                    Span::styled(prompt, Style::default().fg(theme::GREEN)),
                    Span::styled(&app.command_input, palette.command_bar_style()),
                ]),
                Some((prompt.chars().count() + app.command_input.chars().count()) as u16),
            )
        }
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    palette.dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    palette.command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(palette.command_bar_style());
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect, palette: &Palette) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let row = |text: &'static str| Line::from(Span::styled(text, palette.normal_style()));

    let mut help_text = vec![
        Line::from(Span::styled(
            " HisabKitab Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading(" Navigation"),
        row("  j/k or Up/Down   Move cursor           1-4        Switch tabs"),
        row("  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom"),
        row("  H/L              Prev/Next month       Ctrl-q     Quit"),
        Line::from(""),
        heading(" Actions"),
        row("  :                Command mode          Esc        Cancel"),
        row("  D (Home)         Delete transaction    R          Reset all"),
        row("  b/e/a (Budget)   Total/limit/add       r (Budget) Reset category"),
        row("  p/x (Data)       HTML report/CSV       Enter      Change setting"),
        row("  n/e/D (Settings) New/rename/delete category"),
        Line::from(""),
        heading(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 1 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<18} {desc}"),
            palette.normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        palette.dim_style(),
    )));

    // Center the popup, clamped to terminal height
    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(palette.card)),
    );
    f.render_widget(help, popup_area);
}
