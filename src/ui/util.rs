use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::currency;

pub(crate) const INVALID_AMOUNT: &str = "Please enter a valid amount";

/// Parse a user-typed amount. Thousands separators, spaces and a leading
/// currency symbol are ignored. Zero, negative and non-numeric input is rejected.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, &'static str> {
    match parse_decimal(input) {
        Some(amount) if amount > Decimal::ZERO => Ok(amount),
        _ => Err(INVALID_AMOUNT),
    }
}

/// Like [`parse_amount`] but zero is allowed, for clearing a budget.
pub(crate) fn parse_budget(input: &str) -> Result<Decimal, &'static str> {
    match parse_decimal(input) {
        Some(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(INVALID_AMOUNT),
    }
}

fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    let bare = currency::CURRENCIES
        .iter()
        .find_map(|(symbol, _)| trimmed.strip_prefix(symbol))
        .unwrap_or(trimmed);
    let cleaned: String = bare
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let numeric = cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-');
    if cleaned.is_empty() || !numeric {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Split `<category words...> <amount> [description words...]` at the first
/// token that parses as an amount.
pub(crate) fn split_spend_args(args: &str) -> Option<(String, Decimal, String)> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let pos = tokens
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, t)| parse_amount(t).is_ok())
        .map(|(i, _)| i)?;
    let amount = parse_amount(tokens[pos]).ok()?;
    Some((tokens[..pos].join(" "), amount, tokens[pos + 1..].join(" ")))
}

pub(crate) fn default_description(category: &str) -> String {
    format!("Spent on {category}")
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

pub(crate) fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Keep a cursor inside a list that may have shrunk.
pub(crate) fn clamp_index(index: &mut usize, scroll: &mut usize, len: usize) {
    if *index >= len {
        *index = len.saturating_sub(1);
    }
    if *scroll > *index {
        *scroll = *index;
    }
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// `path` if given, else `file_name` in the home directory.
pub(crate) fn output_path(path: &str, file_name: &str) -> String {
    if path.trim().is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{file_name}")
    } else {
        shellexpand(path.trim())
    }
}
