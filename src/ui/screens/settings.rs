use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::titled_block;
use crate::models::currency;
use crate::state::AppState;
use crate::ui::app::{App, SettingsRow};
use crate::ui::theme::{self, Palette};
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SettingsRow::ALL.len() as u16 + 3), // Preferences
            Constraint::Min(4),                                    // Categories
        ])
        .split(area);

    render_preferences(f, chunks[0], app, state, palette);
    render_categories(f, chunks[1], app, state, palette);
}

fn row_style(selected: bool, palette: &Palette) -> Style {
    if selected {
        palette.selected_style()
    } else {
        palette.normal_style()
    }
}

fn render_preferences(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let locale = &state.locale;
    let symbol = state.budget.currency_symbol();

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", locale.t("customizePreferences")),
        palette.dim_style(),
    ))];
    for (i, row) in SettingsRow::ALL.iter().enumerate() {
        let (label, value) = match row {
            SettingsRow::Currency => (
                locale.t("currency"),
                format!("{symbol}  {}", currency::label_for(symbol)),
            ),
            SettingsRow::Language => (
                locale.t("language"),
                locale.language().label().to_string(),
            ),
            SettingsRow::DarkMode => (
                locale.t("darkMode"),
                locale
                    .t(if state.theme.is_dark() { "on" } else { "off" })
                    .to_string(),
            ),
        };
        let style = row_style(i == app.settings_index, palette);
        lines.push(Line::from(vec![
            Span::styled(format!(" {label:<20}"), style),
            Span::styled(
                format!(" {value} "),
                style.fg(theme::ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let prefs = Paragraph::new(lines).block(titled_block(locale.t("preferences"), palette));
    f.render_widget(prefs, area);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let offset = SettingsRow::ALL.len();
    let categories = state.budget.categories();
    let visible = area.height.saturating_sub(2) as usize;
    let selected = app.settings_index.checked_sub(offset);
    // Keep the cursor on screen without a separate scroll offset
    let skip = selected.map_or(0, |s| (s + 1).saturating_sub(visible));

    let items: Vec<ListItem> = categories
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible)
        .map(|(i, category)| {
            let style = row_style(selected == Some(i), palette);
            let badge = if category.is_default { "default" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(
                    " ● ",
                    Style::default().fg(theme::category_color(&category.color)),
                ),
                Span::styled(format!("{:<22}", truncate(&category.name, 21)), style),
                Span::styled(format!("{:<16}", truncate(&category.icon, 15)), palette.dim_style()),
                Span::styled(badge, palette.dim_style()),
            ]))
        })
        .collect();

    let title = format!(
        "{} ({}: n)",
        state.locale.t("categories"),
        state.locale.t("addNew")
    );
    let list = List::new(items).block(titled_block(&title, palette));
    f.render_widget(list, area);
}
