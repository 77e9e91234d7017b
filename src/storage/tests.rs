#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{BudgetSnapshot, MonthKey};

// ── SqliteStore ───────────────────────────────────────────────

#[test]
fn test_sqlite_set_get_remove() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.get("missing").unwrap(), None);

    store.set(CURRENCY_KEY, "€").unwrap();
    assert_eq!(store.get(CURRENCY_KEY).unwrap().as_deref(), Some("€"));

    store.set(CURRENCY_KEY, "$").unwrap();
    assert_eq!(store.get(CURRENCY_KEY).unwrap().as_deref(), Some("$"));

    store.remove(CURRENCY_KEY).unwrap();
    assert_eq!(store.get(CURRENCY_KEY).unwrap(), None);
    // Removing an absent key is fine
    store.remove(CURRENCY_KEY).unwrap();
}

#[test]
fn test_sqlite_fresh_schema_version() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.schema_version().unwrap(), sqlite::CURRENT_VERSION);
}

#[test]
fn test_sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    {
        let store = SqliteStore::open(&path).unwrap();
        store.set(DARK_MODE_KEY, "true").unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    assert_eq!(store.schema_version().unwrap(), 1);
}

#[test]
fn test_sqlite_open_bad_path_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("dir").join("x.db");
    assert!(SqliteStore::open(&path).is_err());
}

// ── JSON helpers ──────────────────────────────────────────────

#[test]
fn test_json_snapshot_roundtrip_through_sqlite() {
    let store = SqliteStore::open_in_memory().unwrap();
    let month = MonthKey::parse("2024-01").unwrap();
    let snap = BudgetSnapshot::default();
    set_json(&store, &month.storage_key(), &snap).unwrap();

    let back: Option<BudgetSnapshot> = get_json(&store, &month.storage_key()).unwrap();
    assert_eq!(back, Some(snap));
}

#[test]
fn test_get_json_absent_and_malformed() {
    let store = MemoryStore::new();
    let absent: Option<Vec<MonthKey>> = get_json(&store, AVAILABLE_MONTHS_KEY).unwrap();
    assert!(absent.is_none());

    store.seed(AVAILABLE_MONTHS_KEY, "{not json");
    let err = get_json::<Vec<MonthKey>>(&store, AVAILABLE_MONTHS_KEY).unwrap_err();
    assert!(matches!(err, StorageError::Decode(_)));
}

#[test]
fn test_available_months_shape() {
    let store = MemoryStore::new();
    let months = vec![
        MonthKey::parse("2024-01").unwrap(),
        MonthKey::parse("2024-02").unwrap(),
    ];
    set_json(&store, AVAILABLE_MONTHS_KEY, &months).unwrap();
    assert_eq!(
        store.raw(AVAILABLE_MONTHS_KEY).unwrap(),
        r#"["2024-01","2024-02"]"#
    );
}

// ── MemoryStore ───────────────────────────────────────────────

#[test]
fn test_memory_store_failure_injection() {
    let store = MemoryStore::new();
    store.set("a", "1").unwrap();
    store.set_failing(true);
    assert!(matches!(store.get("a"), Err(StorageError::Unavailable(_))));
    assert!(store.set("a", "2").is_err());
    store.set_failing(false);
    assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    assert_eq!(store.writes(), vec!["a".to_string()]);
}
