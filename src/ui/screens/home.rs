use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};
use rust_decimal::Decimal;

use super::{render_card, render_empty, titled_block};
use crate::models::currency::format_amount;
use crate::report::percent;
use crate::state::AppState;
use crate::ui::app::App;
use crate::ui::theme::{self, Palette};
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(4),    // Recent transactions
        ])
        .split(area);

    render_summary_cards(f, chunks[0], state, palette);
    render_recent(f, chunks[1], app, state, palette);
}

fn render_summary_cards(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let budget = &state.budget;
    let symbol = budget.currency_symbol();
    let remaining = budget.remaining();
    let used = percent(budget.total_spent(), budget.total_budget());
    let locale = &state.locale;

    render_card(
        f,
        cards[0],
        locale.t("totalBudget"),
        format_amount(budget.total_budget(), symbol),
        theme::ACCENT,
        Some(budget.month().label()),
        palette,
    );
    render_card(
        f,
        cards[1],
        locale.t("spent"),
        format_amount(budget.total_spent(), symbol),
        theme::RED,
        Some(format!("{} txns", budget.recent_transactions().len())),
        palette,
    );
    render_card(
        f,
        cards[2],
        locale.t("remaining"),
        format_amount(remaining, symbol),
        if remaining < Decimal::ZERO {
            theme::RED
        } else {
            theme::GREEN
        },
        None,
        palette,
    );
    render_card(
        f,
        cards[3],
        locale.t("used"),
        format!("{used:.0}%"),
        theme::usage_color(used / 100.0),
        None,
        palette,
    );
}

fn render_recent(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let title = state.locale.t("recentTransactions");
    let recent = state.budget.recent_transactions();
    if recent.is_empty() {
        render_empty(
            f,
            area,
            title,
            &[
                state.locale.t("noTransactions"),
                "Use :spend <category> <amount> [description] or press a on the Budget tab",
            ],
            palette,
        );
        return;
    }

    let symbol = state.budget.currency_symbol();
    let desc_width = (area.width as usize).saturating_sub(48).max(10);

    let items: Vec<ListItem> = recent
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, (category, txn))| {
            let style = if i == app.transaction_index {
                palette.selected_style()
            } else if i % 2 == 0 {
                palette.alt_row_style()
            } else {
                palette.normal_style()
            };
            let dot = Style::default().fg(theme::category_color(&category.color));
            let date = txn.date.format("%b %d %H:%M").to_string();

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {date:<13}"), style),
                Span::styled("● ", dot),
                Span::styled(format!("{:<14}", truncate(&category.name, 13)), style),
                Span::styled(
                    format!("{:<w$}", truncate(&txn.description, desc_width), w = desc_width),
                    style,
                ),
                Span::styled(
                    format!(" {:>14}", format_amount(txn.amount, symbol)),
                    theme::expense_style(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(titled_block(title, palette));
    f.render_widget(list, area);
}
