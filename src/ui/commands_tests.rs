#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::config::Config;
use crate::models::CategoryId;
use crate::storage::{MemoryStore, CURRENCY_KEY};
use crate::ui::app::InputMode;

const FOOD: CategoryId = CategoryId(1);

fn setup() -> (App, AppState, MemoryStore) {
    let store = MemoryStore::new();
    let config = Config {
        data_dir: std::path::PathBuf::from("/unused"),
        save_delay: Duration::from_millis(1000),
        log_filter: String::new(),
    };
    let state = AppState::load(&store, &config, MonthKey::parse("2024-01").unwrap());
    (App::new(), state, store)
}

fn run(input: &str, app: &mut App, state: &mut AppState, store: &MemoryStore) {
    handle_command(input, app, state, store).unwrap();
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut state, store) = setup();
    run("spnd Food 10", &mut app, &mut state, &store);
    assert!(app.status_message.contains("Did you mean :spend?"));
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("total", "total"), 0);
    assert_eq!(levenshtein("totl", "total"), 1);
    assert_eq!(levenshtein("", "abc"), 3);
}

#[test]
fn test_quit() {
    let (mut app, mut state, store) = setup();
    run("q", &mut app, &mut state, &store);
    assert!(!app.running);
}

#[test]
fn test_total_and_limit() {
    let (mut app, mut state, store) = setup();
    run("total 5,000", &mut app, &mut state, &store);
    assert_eq!(state.budget.total_budget(), dec!(5000));
    assert_eq!(app.status_message, "Total budget set to PKR 5,000.00");

    run("limit food 1200", &mut app, &mut state, &store);
    assert_eq!(state.budget.category(FOOD).unwrap().budget, dec!(1200));

    run("limit Nope 5", &mut app, &mut state, &store);
    assert_eq!(app.status_message, "Category 'Nope' not found");
}

#[test]
fn test_invalid_amount_never_reaches_state() {
    let (mut app, mut state, store) = setup();
    run("total abc", &mut app, &mut state, &store);
    assert_eq!(app.status_message, "Please enter a valid amount");
    assert_eq!(state.budget.total_budget(), Decimal::ZERO);

    run("spend Food -5", &mut app, &mut state, &store);
    assert!(state.budget.transactions_for(FOOD).is_empty());
}

#[test]
fn test_spend_with_and_without_description() {
    let (mut app, mut state, store) = setup();
    run("spend Food 250 Lunch", &mut app, &mut state, &store);
    run("s food 50", &mut app, &mut state, &store);

    let txns = state.budget.transactions_for(FOOD);
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].description, "Spent on Food");
    assert_eq!(txns[1].description, "Lunch");
    assert_eq!(state.budget.category(FOOD).unwrap().spent, dec!(300));
}

#[test]
fn test_delete_txn_requires_confirmation() {
    let (mut app, mut state, store) = setup();
    run("spend Food 250 Lunch", &mut app, &mut state, &store);
    run("delete-txn", &mut app, &mut state, &store);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(app.confirm_message, "Delete 'Lunch'?");
    // Nothing removed until confirmed
    assert_eq!(state.budget.category(FOOD).unwrap().spent, dec!(250));

    let action = app.pending_action.take().unwrap();
    apply_pending(action, &mut app, &mut state);
    assert_eq!(state.budget.category(FOOD).unwrap().spent, Decimal::ZERO);
    assert!(state.budget.transactions_for(FOOD).is_empty());
}

#[test]
fn test_reset_all_confirmed() {
    let (mut app, mut state, store) = setup();
    run("total 900", &mut app, &mut state, &store);
    run("spend Food 20", &mut app, &mut state, &store);
    run("reset-all", &mut app, &mut state, &store);
    assert_eq!(app.pending_action, Some(PendingAction::ResetAll));
    let action = app.pending_action.take().unwrap();
    apply_pending(action, &mut app, &mut state);
    assert_eq!(state.budget.total_budget(), Decimal::ZERO);
    assert_eq!(state.budget.total_spent(), Decimal::ZERO);
}

#[test]
fn test_category_add_rename_delete() {
    let (mut app, mut state, store) = setup();
    run("category Gym", &mut app, &mut state, &store);
    let gym = state.budget.find_category("gym").unwrap().id;

    run("category gym", &mut app, &mut state, &store);
    assert_eq!(app.status_message, "Category 'gym' already exists");

    app.category_index = state.budget.categories().iter().position(|c| c.id == gym).unwrap();
    run("rename Fitness", &mut app, &mut state, &store);
    assert_eq!(state.budget.category(gym).unwrap().name, "Fitness");

    run("delete-category Food", &mut app, &mut state, &store);
    assert!(app.pending_action.is_none());
    assert!(app.status_message.contains("default category"));

    run("delete-category Fitness", &mut app, &mut state, &store);
    let action = app.pending_action.take().unwrap();
    apply_pending(action, &mut app, &mut state);
    assert!(state.budget.category(gym).is_none());
}

#[test]
fn test_month_navigation() {
    let (mut app, mut state, store) = setup();
    run("total 100", &mut app, &mut state, &store);
    run("next-month", &mut app, &mut state, &store);
    assert_eq!(state.budget.month().as_str(), "2024-02");
    assert_eq!(app.status_message, "Month: February 2024");
    assert_eq!(state.budget.total_budget(), Decimal::ZERO);

    run("m 1", &mut app, &mut state, &store);
    assert_eq!(state.budget.month().as_str(), "2024-01");
    assert_eq!(state.budget.total_budget(), dec!(100));

    run("month 2024-13", &mut app, &mut state, &store);
    assert!(app.status_message.starts_with("Invalid month"));
    assert_eq!(state.budget.month().as_str(), "2024-01");
}

#[test]
fn test_preferences() {
    let (mut app, mut state, store) = setup();
    run("currency", &mut app, &mut state, &store);
    assert_eq!(state.budget.currency_symbol(), "$");
    run("currency €", &mut app, &mut state, &store);
    assert_eq!(store.raw(CURRENCY_KEY).unwrap(), "€");

    run("language ur", &mut app, &mut state, &store);
    assert_eq!(state.locale.language(), Language::Urdu);
    run("language xx", &mut app, &mut state, &store);
    assert_eq!(state.locale.language(), Language::Urdu);

    run("theme", &mut app, &mut state, &store);
    assert!(state.theme.is_dark());
}

#[test]
fn test_apply_edit_add_transaction() {
    let (mut app, mut state, store) = setup();
    apply_edit(EditTarget::AddTransaction(FOOD), "1,250 Dinner out", &mut app, &mut state, &store);
    assert_eq!(state.budget.category(FOOD).unwrap().spent, dec!(1250));
    assert_eq!(state.budget.transactions_for(FOOD)[0].description, "Dinner out");

    apply_edit(EditTarget::AddTransaction(FOOD), "lots", &mut app, &mut state, &store);
    assert_eq!(app.status_message, "Please enter a valid amount");
    assert_eq!(state.budget.transactions_for(FOOD).len(), 1);
}

#[test]
fn test_apply_edit_budgets() {
    let (mut app, mut state, store) = setup();
    apply_edit(EditTarget::TotalBudget, "5000", &mut app, &mut state, &store);
    apply_edit(EditTarget::CategoryBudget(FOOD), "0", &mut app, &mut state, &store);
    assert_eq!(state.budget.total_budget(), dec!(5000));
    assert_eq!(state.budget.category(FOOD).unwrap().budget, Decimal::ZERO);
}

#[test]
fn test_export_commands_write_files() {
    let (mut app, mut state, store) = setup();
    let tmp = tempfile::tempdir().unwrap();
    run("spend Food 10 Tea", &mut app, &mut state, &store);

    let html = tmp.path().join("r.html");
    run(&format!("report {}", html.display()), &mut app, &mut state, &store);
    assert!(html.exists());
    assert!(app.status_message.starts_with("Report saved to"));

    let csv = tmp.path().join("r.csv");
    run(&format!("export {}", csv.display()), &mut app, &mut state, &store);
    assert!(app.status_message.starts_with("Exported 1 transactions"));

    let bad = tmp.path().join("missing").join("r.html");
    run(&format!("report {}", bad.display()), &mut app, &mut state, &store);
    assert_eq!(app.status_message, "Could not generate report");
}
