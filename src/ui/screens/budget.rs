use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{render_empty, titled_block};
use crate::models::currency::format_amount;
use crate::report::percent;
use crate::state::AppState;
use crate::ui::app::App;
use crate::ui::theme::{self, Palette};
use crate::ui::util::{progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Total budget header
            Constraint::Min(4),    // Category list
        ])
        .split(area);

    render_total(f, chunks[0], state, palette);
    render_categories(f, chunks[1], app, state, palette);
}

fn render_total(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let budget = &state.budget;
    let symbol = budget.currency_symbol();
    let used = percent(budget.total_spent(), budget.total_budget());
    let ratio = (used / 100.0).clamp(0.0, 1.0);
    let color = theme::usage_color(ratio);
    let bar_width = (area.width as usize).saturating_sub(12).clamp(10, 60);

    let text = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(
                format!(" {}: ", state.locale.t("totalBudget")),
                palette.dim_style(),
            ),
            Span::styled(
                format_amount(budget.total_budget(), symbol),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("   {}: ", state.locale.t("spent")), palette.dim_style()),
            Span::styled(format_amount(budget.total_spent(), symbol), theme::expense_style()),
            Span::styled(
                format!("   {}: ", state.locale.t("remaining")),
                palette.dim_style(),
            ),
            Span::styled(
                format_amount(budget.remaining(), symbol),
                theme::remaining_style(budget.remaining().is_sign_negative()),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {}", progress_bar(ratio, bar_width)),
                Style::default().fg(color),
            ),
            Span::styled(
                format!(" {used:.0}%"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(titled_block(&budget.month().label(), palette));

    f.render_widget(text, area);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let title = state.locale.t("categories");
    let categories = state.budget.categories();
    if categories.is_empty() {
        render_empty(f, area, title, &["Use :category <name> to add one"], palette);
        return;
    }

    let symbol = state.budget.currency_symbol();

    let items: Vec<ListItem> = categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, category)| {
            let ratio = category.usage_ratio();
            let color = theme::usage_color(ratio);
            let style = if i == app.category_index {
                palette.selected_style()
            } else if i % 2 == 0 {
                palette.alt_row_style()
            } else {
                palette.normal_style()
            };
            let count = state.budget.transactions_for(category.id).len();

            ListItem::new(Line::from(vec![
                Span::styled(
                    "● ",
                    Style::default().fg(theme::category_color(&category.color)),
                ),
                Span::styled(format!("{:<18}", truncate(&category.name, 17)), style),
                Span::styled(
                    format!(
                        "{:>14} / {:<14} ",
                        format_amount(category.spent, symbol),
                        format_amount(category.budget, symbol)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>3.0}%", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {count} txns"), palette.dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(titled_block(title, palette));
    f.render_widget(list, area);
}
