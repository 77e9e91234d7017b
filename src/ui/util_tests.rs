#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("اخراجات کی اقسام", 4), "اخر…");
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_plain_and_decorated() {
    assert_eq!(parse_amount("250").unwrap(), dec!(250));
    assert_eq!(parse_amount(" 12.50 ").unwrap(), dec!(12.50));
    assert_eq!(parse_amount("1,234.5").unwrap(), dec!(1234.5));
    assert_eq!(parse_amount("PKR 5,000").unwrap(), dec!(5000));
    assert_eq!(parse_amount("$9.99").unwrap(), dec!(9.99));
}

#[test]
fn test_parse_amount_rejects_invalid() {
    for bad in ["", "abc", "0", "0.00", "-5", "12abc", "1.2.3", "abc12", "x5", "PKR", "$-3"] {
        assert_eq!(parse_amount(bad), Err(INVALID_AMOUNT), "input {bad:?}");
    }
}

#[test]
fn test_parse_budget_allows_zero() {
    assert_eq!(parse_budget("0").unwrap(), Decimal::ZERO);
    assert_eq!(parse_budget("0.00").unwrap(), Decimal::ZERO);
    assert_eq!(parse_budget("PKR 0").unwrap(), Decimal::ZERO);
    assert!(parse_budget("zero").is_err());
    assert_eq!(parse_budget("5000").unwrap(), dec!(5000));
    assert!(parse_budget("-1").is_err());
}

// ── split_spend_args ──────────────────────────────────────────

#[test]
fn test_split_spend_args() {
    let (cat, amount, desc) = split_spend_args("Food 250 Lunch with team").unwrap();
    assert_eq!(cat, "Food");
    assert_eq!(amount, dec!(250));
    assert_eq!(desc, "Lunch with team");

    let (cat, amount, desc) = split_spend_args("Eating Out 1,200").unwrap();
    assert_eq!(cat, "Eating Out");
    assert_eq!(amount, dec!(1200));
    assert_eq!(desc, "");
}

#[test]
fn test_split_spend_args_requires_category_and_amount() {
    assert!(split_spend_args("250 Lunch").is_none());
    assert!(split_spend_args("Food lunch").is_none());
    assert!(split_spend_args("").is_none());
}

#[test]
fn test_split_spend_args_skips_words_with_digits() {
    let (cat, amount, desc) = split_spend_args("Food Room2 300").unwrap();
    assert_eq!(cat, "Food Room2");
    assert_eq!(amount, dec!(300));
    assert_eq!(desc, "");
}

#[test]
fn test_default_description() {
    assert_eq!(default_description("Bills"), "Spent on Bills");
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_clamps() {
    assert_eq!(progress_bar(0.5, 4), "[██░░]");
    assert_eq!(progress_bar(2.0, 2), "[██]");
    assert_eq!(progress_bar(-1.0, 2), "[░░]");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_basic() {
    let mut index = 0;
    let mut scroll = 0;
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 1);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_down_past_page() {
    let mut index = 4;
    let mut scroll = 0;
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 5);
    assert_eq!(scroll, 1);
}

#[test]
fn test_scroll_down_at_end() {
    let mut index = 9;
    let mut scroll = 5;
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 9);
}

#[test]
fn test_scroll_up_adjusts_scroll() {
    let mut index = 5;
    let mut scroll = 5;
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 4);
    assert_eq!(scroll, 4);
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let mut index = 0;
    let mut scroll = 0;
    scroll_to_bottom(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 9);
    assert_eq!(scroll, 5);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_clamp_index_after_shrink() {
    let mut index = 7;
    let mut scroll = 6;
    clamp_index(&mut index, &mut scroll, 3);
    assert_eq!((index, scroll), (2, 2));
    clamp_index(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}

// ── paths ─────────────────────────────────────────────────────

#[test]
fn test_output_path_explicit() {
    assert_eq!(output_path(" /tmp/r.html ", "x.html"), "/tmp/r.html");
}

#[test]
fn test_shellexpand_no_tilde() {
    assert_eq!(shellexpand("/tmp/a.csv"), "/tmp/a.csv");
}
