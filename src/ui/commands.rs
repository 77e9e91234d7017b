use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, EditTarget, PendingAction, Screen};
use super::util::{default_description, output_path, parse_amount, parse_budget, split_spend_args};
use crate::models::{currency, MonthKey, Transaction};
use crate::report::{self, ReportData};
use crate::state::{AppState, Language};
use crate::storage::KeyValueStore;

type CommandFn = fn(&str, &mut App, &mut AppState, &dyn KeyValueStore) -> anyhow::Result<()>;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: CommandFn,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit HisabKitab", cmd_quit, r);
    register_command!("quit", "Quit HisabKitab", cmd_quit, r);
    register_command!("home", "Go to Home", cmd_home, r);
    register_command!("budget", "Go to Budget", cmd_budget_screen, r);
    register_command!("data", "Go to Data", cmd_data, r);
    register_command!("settings", "Go to Settings", cmd_settings, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "total",
        "Set total budget (e.g. :total 50000)",
        cmd_total,
        r
    );
    register_command!(
        "limit",
        "Set category budget (e.g. :limit Food 12000)",
        cmd_limit,
        r
    );
    register_command!(
        "spend",
        "Add transaction (e.g. :spend Food 250 Lunch)",
        cmd_spend,
        r
    );
    register_command!(
        "s",
        "Add transaction (e.g. :s Food 250 Lunch)",
        cmd_spend,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!(
        "reset",
        "Reset one category (e.g. :reset Food)",
        cmd_reset,
        r
    );
    register_command!("reset-all", "Reset all budgets and transactions", cmd_reset_all, r);
    register_command!(
        "category",
        "Add category (e.g. :category Gym)",
        cmd_category,
        r
    );
    register_command!(
        "rename",
        "Rename selected category (e.g. :rename Meals)",
        cmd_rename,
        r
    );
    register_command!(
        "delete-category",
        "Delete a custom category (e.g. :delete-category Gym)",
        cmd_delete_category,
        r
    );
    register_command!(
        "currency",
        "Set currency symbol (e.g. :currency $)",
        cmd_currency,
        r
    );
    register_command!(
        "language",
        "Set language (:language en | ur)",
        cmd_language,
        r
    );
    register_command!("theme", "Toggle dark mode", cmd_theme, r);
    register_command!(
        "report",
        "Save HTML report (e.g. :report ~/jan.html)",
        cmd_report,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/jan.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, state, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(
    _args: &str,
    app: &mut App,
    _state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

pub(crate) fn switch_screen(
    app: &mut App,
    state: &AppState,
    store: &dyn KeyValueStore,
    screen: Screen,
) {
    app.screen = screen;
    if screen == Screen::Data {
        app.refresh_month_totals(&state.budget, store);
    }
    app.clamp_cursors(state);
    app.set_status(format!("{screen}"));
}

fn cmd_home(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    switch_screen(app, state, store, Screen::Home);
    Ok(())
}

fn cmd_budget_screen(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    switch_screen(app, state, store, Screen::Budget);
    Ok(())
}

fn cmd_data(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    switch_screen(app, state, store, Screen::Data);
    Ok(())
}

fn cmd_settings(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    switch_screen(app, state, store, Screen::Settings);
    Ok(())
}

fn cmd_help(
    _args: &str,
    app: &mut App,
    _state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

// ── Months ───────────────────────────────────────────────────

pub(crate) fn go_to_month(
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
    month: MonthKey,
) {
    state.budget.set_current_month(month, store);
    app.on_month_changed(state, store);
    app.set_status(format!("Month: {}", state.budget.month().label()));
}

fn cmd_month(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    if args.is_empty() {
        go_to_month(app, state, store, MonthKey::current());
        return Ok(());
    }
    match MonthKey::parse_relative(args, state.budget.month()) {
        Ok(month) => go_to_month(app, state, store, month),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_next_month(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let next = state.budget.month().next();
    go_to_month(app, state, store, next);
    Ok(())
}

fn cmd_prev_month(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let prev = state.budget.month().prev();
    go_to_month(app, state, store, prev);
    Ok(())
}

// ── Budget ───────────────────────────────────────────────────

fn cmd_total(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :total <amount>");
        return Ok(());
    }
    match parse_budget(args) {
        Ok(amount) => {
            state.budget.set_total_budget(amount);
            let shown = currency::format_amount(amount, state.budget.currency_symbol());
            app.set_status(format!("Total budget set to {shown}"));
        }
        Err(msg) => app.set_status(msg),
    }
    Ok(())
}

fn cmd_limit(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :limit <category> <amount>");
        return Ok(());
    }
    let (amount_str, name) = (parts[0], parts[1]);
    let amount = match parse_budget(amount_str) {
        Ok(a) => a,
        Err(msg) => {
            app.set_status(msg);
            return Ok(());
        }
    };
    let found = state.budget.find_category(name).map(|c| (c.id, c.name.clone()));
    let Some((id, cat_name)) = found else {
        app.set_status(format!("Category '{name}' not found"));
        return Ok(());
    };
    state.budget.set_category_budget(id, amount);
    let shown = currency::format_amount(amount, state.budget.currency_symbol());
    app.set_status(format!("Budget set: {cat_name} = {shown}"));
    Ok(())
}

fn cmd_spend(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let Some((name, amount, description)) = split_spend_args(args) else {
        app.set_status("Usage: :spend <category> <amount> [description]");
        return Ok(());
    };
    let found = state.budget.find_category(&name).map(|c| (c.id, c.name.clone()));
    let Some((id, cat_name)) = found else {
        app.set_status(format!("Category '{name}' not found"));
        return Ok(());
    };
    add_transaction(app, state, id, &cat_name, amount, description);
    Ok(())
}

pub(crate) fn add_transaction(
    app: &mut App,
    state: &mut AppState,
    id: crate::models::CategoryId,
    cat_name: &str,
    amount: rust_decimal::Decimal,
    description: String,
) {
    let description = if description.trim().is_empty() {
        default_description(cat_name)
    } else {
        description.trim().to_string()
    };
    let shown = currency::format_amount(amount, state.budget.currency_symbol());
    if state.budget.add_transaction(id, Transaction::now(description.clone(), amount)) {
        app.set_status(format!("Added {shown} to {cat_name}: {description}"));
    }
}

fn cmd_delete_txn(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    if app.screen != Screen::Home {
        app.set_status("Go to Home and select a transaction first");
        return Ok(());
    }
    let selected = state
        .budget
        .recent_transactions()
        .get(app.transaction_index)
        .map(|(cat, txn)| (cat.id, txn.date, txn.description.clone()));
    match selected {
        Some((category, date, description)) => app.confirm(
            PendingAction::DeleteTransaction {
                category,
                date,
                description: description.clone(),
            },
            format!("Delete '{description}'?"),
        ),
        None => app.set_status("No transactions to delete"),
    }
    Ok(())
}

fn cmd_reset(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let target = if args.is_empty() {
        app.selected_category(state)
            .and_then(|id| state.budget.category(id))
    } else {
        state.budget.find_category(args)
    };
    match target.map(|c| (c.id, c.name.clone())) {
        Some((id, name)) => app.confirm(
            PendingAction::ResetCategory { id, name: name.clone() },
            format!("Reset budget and transactions of '{name}'?"),
        ),
        None => app.set_status(format!("Category '{args}' not found")),
    }
    Ok(())
}

fn cmd_reset_all(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    app.confirm(
        PendingAction::ResetAll,
        format!("Reset ALL budgets and transactions for {}?", state.budget.month().label()),
    );
    Ok(())
}

// ── Categories ───────────────────────────────────────────────

fn cmd_category(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name>");
        return Ok(());
    }
    match state.budget.add_category(args, "tag", "#6b7280") {
        Ok(_) => app.set_status(format!("Created category: {}", args.trim())),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

/// The category the cursor is on in the current screen.
fn focused_category(app: &App, state: &AppState) -> Option<crate::models::CategoryId> {
    match app.screen {
        Screen::Settings => app.selected_settings_category(state),
        _ => app.selected_category(state),
    }
}

fn cmd_rename(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let Some(id) = focused_category(app, state) else {
        app.set_status("Select a category first");
        return Ok(());
    };
    if args.is_empty() {
        let current = state.budget.category(id).map(|c| c.name.clone()).unwrap_or_default();
        app.begin_edit(EditTarget::RenameCategory(id), current);
        app.set_status("Type new name, press Enter to confirm");
        return Ok(());
    }
    match state.budget.rename_category(id, args) {
        Ok(()) => app.set_status(format!("Renamed to: {}", args.trim())),
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_delete_category(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let target = if args.is_empty() {
        focused_category(app, state).and_then(|id| state.budget.category(id))
    } else {
        state.budget.find_category(args)
    };
    let Some(cat) = target else {
        app.set_status(format!("Category '{args}' not found"));
        return Ok(());
    };
    if cat.is_default {
        app.set_status(format!("'{}' is a default category and cannot be removed", cat.name));
        return Ok(());
    }
    let (id, name) = (cat.id, cat.name.clone());
    app.confirm(
        PendingAction::DeleteCategory { id, name: name.clone() },
        format!("Delete category '{name}' and its transactions?"),
    );
    Ok(())
}

// ── Preferences ──────────────────────────────────────────────

fn cmd_currency(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let symbol = if args.is_empty() {
        currency::next_symbol(state.budget.currency_symbol()).to_string()
    } else {
        args.to_string()
    };
    state.budget.set_currency_symbol(&symbol, store);
    let current = state.budget.currency_symbol();
    app.set_status(format!("Currency: {current} ({})", currency::label_for(current)));
    Ok(())
}

fn cmd_language(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let language = if args.is_empty() {
        Some(state.locale.language().next())
    } else {
        Language::from_code(args)
    };
    match language {
        Some(language) => {
            state.locale.set_language(language, store);
            app.set_status(format!("Language: {}", language.label()));
        }
        None => app.set_status(format!("Unknown language '{args}'. Use en or ur")),
    }
    Ok(())
}

fn cmd_theme(
    _args: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    state.theme.toggle(store);
    let on = if state.theme.is_dark() { "on" } else { "off" };
    app.set_status(format!("Dark mode {on}"));
    Ok(())
}

// ── Export ───────────────────────────────────────────────────

fn cmd_report(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let data = ReportData::from_state(&state.budget);
    let path = output_path(args, &data.default_file_name("html"));
    match report::html::write(&data, Path::new(&path)) {
        Ok(()) => app.set_status(format!("Report saved to {path}")),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "report failed");
            app.set_status(report::FAILURE_MESSAGE);
        }
    }
    Ok(())
}

fn cmd_export(
    args: &str,
    app: &mut App,
    state: &mut AppState,
    _store: &dyn KeyValueStore,
) -> anyhow::Result<()> {
    let data = ReportData::from_state(&state.budget);
    let path = output_path(args, &data.default_file_name("csv"));
    match report::csv::write(&data, Path::new(&path)) {
        Ok(0) => app.set_status(format!("No transactions to export (wrote header to {path})")),
        Ok(count) => app.set_status(format!("Exported {count} transactions to {path}")),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "csv export failed");
            app.set_status(report::FAILURE_MESSAGE);
        }
    }
    Ok(())
}

// ── Inline editor and confirmations ──────────────────────────

/// Apply what the user typed into the inline editor.
pub(crate) fn apply_edit(
    target: EditTarget,
    input: &str,
    app: &mut App,
    state: &mut AppState,
    store: &dyn KeyValueStore,
) {
    match target {
        EditTarget::TotalBudget => match parse_budget(input) {
            Ok(amount) => {
                state.budget.set_total_budget(amount);
                app.set_status("Total budget updated");
            }
            Err(msg) => app.set_status(msg),
        },
        EditTarget::CategoryBudget(id) => match parse_budget(input) {
            Ok(amount) => {
                state.budget.set_category_budget(id, amount);
                app.set_status("Category budget updated");
            }
            Err(msg) => app.set_status(msg),
        },
        EditTarget::AddTransaction(id) => {
            let mut parts = input.trim().splitn(2, ' ');
            let amount = parts.next().map(parse_amount);
            let description = parts.next().unwrap_or("").to_string();
            let cat_name = state.budget.category(id).map(|c| c.name.clone());
            match (amount, cat_name) {
                (Some(Ok(amount)), Some(cat_name)) => {
                    add_transaction(app, state, id, &cat_name, amount, description);
                }
                (_, None) => app.set_status("Category no longer exists"),
                _ => app.set_status(super::util::INVALID_AMOUNT),
            }
        }
        EditTarget::NewCategory => match state.budget.add_category(input, "tag", "#6b7280") {
            Ok(_) => app.set_status(format!("Created category: {}", input.trim())),
            Err(e) => app.set_status(e.to_string()),
        },
        EditTarget::RenameCategory(id) => match state.budget.rename_category(id, input) {
            Ok(()) => app.set_status(format!("Renamed to: {}", input.trim())),
            Err(e) => app.set_status(e.to_string()),
        },
        EditTarget::CurrencySymbol => {
            state.budget.set_currency_symbol(input, store);
            app.set_status(format!("Currency: {}", state.budget.currency_symbol()));
        }
    }
    app.clamp_cursors(state);
}

pub(crate) fn apply_pending(action: PendingAction, app: &mut App, state: &mut AppState) {
    match action {
        PendingAction::DeleteTransaction {
            category,
            date,
            description,
        } => {
            if state.budget.delete_transaction(category, date).is_some() {
                app.set_status(format!("Deleted: {description}"));
            }
        }
        PendingAction::ResetCategory { id, name } => {
            if state.budget.reset_category_budget(id) {
                app.set_status(format!("Reset: {name}"));
            }
        }
        PendingAction::ResetAll => {
            state.budget.reset_all_budgets();
            app.set_status("All budgets reset");
        }
        PendingAction::DeleteCategory { id, name } => match state.budget.remove_category(id) {
            Ok(true) => app.set_status(format!("Deleted category: {name}")),
            Ok(false) => {}
            Err(e) => app.set_status(e.to_string()),
        },
    }
    app.clamp_cursors(state);
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
