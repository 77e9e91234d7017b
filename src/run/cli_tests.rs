#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal_macros::dec;

use super::*;
use crate::models::BudgetSnapshot;
use crate::storage::MemoryStore;

fn config() -> Config {
    Config {
        data_dir: std::path::PathBuf::from("/unused"),
        save_delay: Duration::from_millis(1000),
        log_filter: String::new(),
    }
}

fn run(args: &[&str], store: &MemoryStore) -> Result<String> {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let mut out = Vec::new();
    run_command(&args, store, &config(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn stored_snapshot(store: &MemoryStore, month: &str) -> BudgetSnapshot {
    serde_json::from_str(&store.raw(&format!("budgetData_{month}")).unwrap()).unwrap()
}

// ── Dispatch ─────────────────────────────────────────────────

#[test]
fn test_unknown_command_fails() {
    let store = MemoryStore::new();
    let err = run(&["frobnicate"], &store).unwrap_err();
    assert_eq!(err.to_string(), "Unknown command: frobnicate");
}

#[test]
fn test_help_and_version() {
    let store = MemoryStore::new();
    assert!(run(&["--help"], &store).unwrap().contains("Usage: hisabkitab"));
    assert!(run(&["-V"], &store).unwrap().starts_with("hisabkitab "));
}

#[test]
fn test_month_flag_parsing() {
    let args: Vec<String> = ["Food", "--month", "2024-03", "12"]
        .iter()
        .map(|a| a.to_string())
        .collect();
    let (month, rest) = split_month_flag(&args).unwrap();
    assert_eq!(month.unwrap().as_str(), "2024-03");
    assert_eq!(rest, vec!["Food", "12"]);

    let missing = vec!["--month".to_string()];
    assert!(split_month_flag(&missing).is_err());
    let bad = vec!["--month".to_string(), "March".to_string()];
    assert!(split_month_flag(&bad).is_err());
}

// ── Mutations ────────────────────────────────────────────────

#[test]
fn test_budget_writes_through() {
    let store = MemoryStore::new();
    let out = run(&["budget", "5,000", "--month", "2024-01"], &store).unwrap();
    assert_eq!(out, "Total budget for January 2024 set to PKR 5,000.00\n");
    assert_eq!(stored_snapshot(&store, "2024-01").total_budget, dec!(5000));
    assert_eq!(store.raw("availableMonths").unwrap(), r#"["2024-01"]"#);
}

#[test]
fn test_budget_rejects_bad_amount() {
    let store = MemoryStore::new();
    let err = run(&["budget", "lots", "--month", "2024-01"], &store).unwrap_err();
    assert_eq!(err.to_string(), "Please enter a valid amount");
    assert!(store.raw("budgetData_2024-01").is_none());

    assert!(run(&["budget"], &store).is_err());
}

#[test]
fn test_spend_records_transaction() {
    let store = MemoryStore::new();
    run(&["spend", "food", "250", "Lunch", "out", "--month", "2024-01"], &store).unwrap();
    let out = run(&["spend", "Bills", "1200", "--month", "2024-01"], &store).unwrap();
    assert_eq!(out, "Added PKR 1,200.00 to Bills: Spent on Bills\n");

    let snap = stored_snapshot(&store, "2024-01");
    let food = snap.categories.iter().find(|c| c.name == "Food").unwrap();
    assert_eq!(food.spent, dec!(250));
    assert_eq!(snap.transactions_for(food.id)[0].description, "Lunch out");
    assert_eq!(snap.total_spent(), dec!(1450));
}

#[test]
fn test_spend_unknown_category() {
    let store = MemoryStore::new();
    let err = run(&["spend", "Yachts", "10", "--month", "2024-01"], &store).unwrap_err();
    assert_eq!(err.to_string(), "Category 'Yachts' not found");
}

// ── Reads ────────────────────────────────────────────────────

#[test]
fn test_summary_reads_stored_month() {
    let store = MemoryStore::new();
    run(&["budget", "1000", "--month", "2024-02"], &store).unwrap();
    run(&["spend", "Food", "250", "--month", "2024-02"], &store).unwrap();

    let out = run(&["summary", "2024-02"], &store).unwrap();
    assert!(out.starts_with("HisabKitab: February 2024\n"));
    assert!(out.contains("Remaining:  PKR 750.00"));
    assert!(out.contains("Used:       25%"));
    assert!(out.contains("Food"));
}

#[test]
fn test_summary_does_not_register_month() {
    let store = MemoryStore::new();
    run(&["summary", "2023-11"], &store).unwrap();
    assert!(store.writes().is_empty());
}

#[test]
fn test_months_lists_recorded_only() {
    let store = MemoryStore::new();
    assert_eq!(run(&["months"], &store).unwrap(), "No months recorded\n");

    run(&["budget", "300", "--month", "2023-12"], &store).unwrap();
    run(&["budget", "400", "--month", "2024-01"], &store).unwrap();
    let out = run(&["months"], &store).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("2023-12"));
    assert!(lines[2].contains("PKR 300.00"));
    assert!(lines[3].starts_with("2024-01"));
}

// ── Exports ──────────────────────────────────────────────────

#[test]
fn test_report_and_export_files() {
    let store = MemoryStore::new();
    let tmp = tempfile::tempdir().unwrap();
    run(&["spend", "Food", "99", "Tea", "--month", "2024-01"], &store).unwrap();

    let html = tmp.path().join("jan.html");
    let html_arg = html.display().to_string();
    run(&["report", &html_arg, "--month", "2024-01"], &store).unwrap();
    assert!(std::fs::read_to_string(&html).unwrap().contains("Tea"));

    let csv = tmp.path().join("jan.csv");
    let csv_arg = csv.display().to_string();
    let out = run(&["export", &csv_arg, "--month", "2024-01"], &store).unwrap();
    assert_eq!(out, format!("Exported 1 transactions to {csv_arg}\n"));
}

#[test]
fn test_report_failure_is_generic() {
    let store = MemoryStore::new();
    let tmp = tempfile::tempdir().unwrap();
    let bad = tmp.path().join("missing").join("r.html").display().to_string();
    let err = run(&["report", &bad, "--month", "2024-01"], &store).unwrap_err();
    assert_eq!(err.to_string(), "Could not generate report");
}
