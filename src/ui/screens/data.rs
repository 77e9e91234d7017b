use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Gauge},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::{render_empty, titled_block};
use crate::models::currency::format_amount;
use crate::report::percent;
use crate::state::{AppState, MonthTotal};
use crate::ui::app::App;
use crate::ui::theme::{self, Palette};
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Utilisation gauge
            Constraint::Percentage(55), // Spending by category
            Constraint::Min(6),         // Month-over-month trend
        ])
        .split(area);

    render_usage_gauge(f, chunks[0], state, palette);
    render_spending_chart(f, chunks[1], state, palette);
    render_trend(f, chunks[2], app, state, palette);
}

fn render_usage_gauge(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let budget = &state.budget;
    let used = percent(budget.total_spent(), budget.total_budget());
    let ratio = (used / 100.0).clamp(0.0, 1.0);
    let symbol = budget.currency_symbol();

    let gauge = Gauge::default()
        .block(titled_block(state.locale.t("budgetUsage"), palette))
        .gauge_style(Style::default().fg(theme::usage_color(ratio)).bg(palette.bar))
        .ratio(ratio)
        .label(format!(
            "{used:.0}%  {} / {}",
            format_amount(budget.total_spent(), symbol),
            format_amount(budget.total_budget(), symbol)
        ));
    f.render_widget(gauge, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let title = state.locale.t("spendingByCategory");
    let spending: Vec<_> = state
        .budget
        .categories()
        .iter()
        .filter(|c| c.spent > Decimal::ZERO)
        .collect();

    if spending.is_empty() {
        render_empty(f, area, title, &[state.locale.t("noTransactions")], palette);
        return;
    }

    let bars: Vec<Bar> = spending
        .iter()
        .map(|category| {
            let color = theme::category_color(&category.color);
            Bar::default()
                .value(category.spent.to_u64().unwrap_or(0))
                .label(Line::from(truncate(&category.name, 10)))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(palette.background)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(title, palette))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .value_style(palette.normal_style());

    f.render_widget(chart, area);
}

/// Budget and spent per month, oldest first. The cached totals can lag
/// behind edits to the active month, so that entry is taken live.
fn trend_rows(app: &App, state: &AppState) -> Vec<MonthTotal> {
    let budget = &state.budget;
    let mut rows: Vec<MonthTotal> = app
        .month_totals
        .iter()
        .filter(|t| t.month != *budget.month())
        .cloned()
        .collect();
    rows.push(MonthTotal {
        month: budget.month().clone(),
        budget: budget.total_budget(),
        spent: budget.total_spent(),
    });
    rows.sort_by(|a, b| a.month.cmp(&b.month));
    rows
}

fn render_trend(f: &mut Frame, area: Rect, app: &App, state: &AppState, palette: &Palette) {
    let rows = trend_rows(app, state);
    // Each month is a pair of bars plus a gap
    let fit = ((area.width.saturating_sub(2)) / 13).max(1) as usize;
    let shown = &rows[rows.len().saturating_sub(fit)..];

    let groups: Vec<BarGroup> = shown
        .iter()
        .map(|row| {
            let label = row.month.as_str().to_string();
            let used = percent(row.spent, row.budget);
            BarGroup::default()
                .label(Line::from(label))
                .bars(&[
                    Bar::default()
                        .value(row.budget.to_u64().unwrap_or(0))
                        .style(Style::default().fg(theme::ACCENT)),
                    Bar::default()
                        .value(row.spent.to_u64().unwrap_or(0))
                        .style(Style::default().fg(theme::usage_color(used / 100.0))),
                ])
        })
        .collect();

    let title = format!(
        "{} ({} / {})",
        state.locale.t("spendingTrend"),
        state.locale.t("budget"),
        state.locale.t("spent")
    );
    let mut chart = BarChart::default()
        .block(titled_block(&title, palette))
        .bar_width(5)
        .bar_gap(1)
        .group_gap(2)
        .value_style(palette.normal_style());
    for group in groups {
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}
