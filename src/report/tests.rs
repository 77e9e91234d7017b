#![allow(clippy::unwrap_used)]

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;

use super::*;
use crate::models::CategoryId;
use crate::storage::MemoryStore;

const FOOD: CategoryId = CategoryId(1);
const BILLS: CategoryId = CategoryId(3);

fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn sample_state(store: &MemoryStore) -> BudgetState {
    let mut state = BudgetState::load(
        store,
        MonthKey::parse("2024-01").unwrap(),
        Duration::from_millis(1000),
    );
    state.set_total_budget(dec!(5000));
    state.add_transaction(FOOD, Transaction::new(at("2024-01-05T12:00:00Z"), "Lunch".into(), dec!(1200)));
    state.add_transaction(BILLS, Transaction::new(at("2024-01-06T09:30:00Z"), "Power".into(), dec!(800)));
    state
}

// ── ReportData ────────────────────────────────────────────────

#[test]
fn test_report_data_from_state() {
    let store = MemoryStore::new();
    let data = ReportData::from_state(&sample_state(&store));
    assert_eq!(data.month.as_str(), "2024-01");
    assert_eq!(data.currency, "PKR");
    assert_eq!(data.total_spent, dec!(2000));
    assert_eq!(data.remaining, dec!(3000));
    assert_eq!(data.categories.len(), 7);
    assert_eq!(data.transaction_count(), 2);
    assert!((data.utilisation() - 40.0).abs() < 1e-9);
    assert_eq!(data.default_file_name("csv"), "hisabkitab-2024-01.csv");
}

#[test]
fn test_percent_zero_budget() {
    assert_eq!(percent(dec!(100), Decimal::ZERO), 0.0);
    assert!((percent(dec!(25), dec!(200)) - 12.5).abs() < 1e-9);
}

// ── HTML ──────────────────────────────────────────────────────

#[test]
fn test_html_contains_overview_and_categories() {
    let store = MemoryStore::new();
    let html = html::render(&ReportData::from_state(&sample_state(&store)));
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("January 2024"));
    assert!(html.contains("PKR 5,000.00"));
    assert!(html.contains("PKR 3,000.00"));
    assert!(html.contains("40.0%"));
    assert!(html.contains("<h3>Food</h3>"));
    assert!(html.contains("24.0% of total budget"));
    assert!(html.contains("Lunch"));
    assert!(html.contains("No transactions"));
    assert!(html.contains("border-left-color: #ef4444"));
}

#[test]
fn test_html_escapes_user_text() {
    let store = MemoryStore::new();
    let mut state = sample_state(&store);
    let id = state.add_category("<script>", "", "red;}</style>").unwrap();
    state.add_transaction(id, Transaction::now("Tom & \"Jerry\"".into(), dec!(1)));
    let html = html::render(&ReportData::from_state(&state));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
    assert!(!html.contains("red;}"));
}

#[test]
fn test_html_zero_budget_percentages() {
    let store = MemoryStore::new();
    let mut state = sample_state(&store);
    state.set_total_budget(Decimal::ZERO);
    let html = html::render(&ReportData::from_state(&state));
    assert!(html.contains("<strong>0.0%</strong>"));
    assert!(html.contains("0.0% of total budget"));
    assert!(!html.contains("NaN"));
}

#[test]
fn test_html_write_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("report.html");
    let store = MemoryStore::new();
    html::write(&ReportData::from_state(&sample_state(&store)), &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("HisabKitab Financial Report"));
    assert!(!tmp.path().join(".report.html.tmp").exists());
}

#[test]
fn test_write_into_missing_dir_fails_cleanly() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("missing").join("report.html");
    let store = MemoryStore::new();
    assert!(html::write(&ReportData::from_state(&sample_state(&store)), &path).is_err());
    assert!(!path.exists());
}

// ── CSV ───────────────────────────────────────────────────────

#[test]
fn test_csv_rows() {
    let store = MemoryStore::new();
    let data = ReportData::from_state(&sample_state(&store));
    let text = String::from_utf8(csv::to_bytes(&data).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "month,category,date,description,amount");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "2024-01,Food,2024-01-05T12:00:00+00:00,Lunch,1200");
    assert_eq!(lines[2], "2024-01,Bills,2024-01-06T09:30:00+00:00,Power,800");
}

#[test]
fn test_csv_write_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("out.csv");
    let store = MemoryStore::new();
    let count = csv::write(&ReportData::from_state(&sample_state(&store)), &path).unwrap();
    assert_eq!(count, 2);
    let mut rdr = ::csv::Reader::from_path(&path).unwrap();
    assert_eq!(rdr.records().count(), 2);
}
