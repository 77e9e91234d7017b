#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_explicit_values() {
    let cfg = Config::from_lookup(lookup(&[
        (DATA_DIR_VAR, "/tmp/hk"),
        (SAVE_DELAY_VAR, "250"),
        (LOG_VAR, "hisabkitab=debug"),
    ]))
    .unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from("/tmp/hk"));
    assert_eq!(cfg.db_path(), PathBuf::from("/tmp/hk/hisabkitab.db"));
    assert_eq!(cfg.log_path(), PathBuf::from("/tmp/hk/hisabkitab.log"));
    assert_eq!(cfg.save_delay, Duration::from_millis(250));
    assert_eq!(cfg.log_filter, "hisabkitab=debug");
}

#[test]
fn test_defaults() {
    let cfg = Config::from_lookup(lookup(&[(DATA_DIR_VAR, "/tmp/hk")])).unwrap();
    assert_eq!(cfg.save_delay, Duration::from_millis(1000));
    assert_eq!(cfg.log_filter, "hisabkitab=info");
}

#[test]
fn test_invalid_save_delay() {
    let err = Config::from_lookup(lookup(&[
        (DATA_DIR_VAR, "/tmp/hk"),
        (SAVE_DELAY_VAR, "soon"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSaveDelay(ref v) if v == "soon"));
    assert!(err.to_string().contains(SAVE_DELAY_VAR));
}

#[test]
fn test_ensure_data_dir_creates_nested() {
    let tmp = tempfile::tempdir().unwrap();
    let nested = tmp.path().join("a").join("b");
    let cfg = Config::from_lookup(lookup(&[(DATA_DIR_VAR, nested.to_str().unwrap())])).unwrap();
    cfg.ensure_data_dir().unwrap();
    assert!(nested.is_dir());
}
