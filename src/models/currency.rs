use rust_decimal::Decimal;

pub(crate) const DEFAULT_SYMBOL: &str = "PKR";

/// Symbols offered by the currency picker, with their display labels.
pub(crate) const CURRENCIES: &[(&str, &str)] = &[
    ("PKR", "Pakistani Rupee"),
    ("$", "US Dollar"),
    ("€", "Euro"),
    ("£", "British Pound"),
    ("¥", "Japanese Yen"),
    ("₹", "Indian Rupee"),
];

pub(crate) fn label_for(symbol: &str) -> &str {
    CURRENCIES
        .iter()
        .find(|(s, _)| *s == symbol)
        .map_or(symbol, |&(_, label)| label)
}

/// The symbol after `symbol` in the picker, wrapping around. Unknown symbols restart at the top.
pub(crate) fn next_symbol(symbol: &str) -> &'static str {
    let idx = CURRENCIES
        .iter()
        .position(|(s, _)| *s == symbol)
        .map_or(0, |i| (i + 1) % CURRENCIES.len());
    CURRENCIES[idx].0
}

/// Format an amount with thousand separators, 2 decimal places and the
/// currency symbol. Word symbols get a space: `PKR 1,234.50`, `$1,234.50`.
pub(crate) fn format_amount(val: Decimal, symbol: &str) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sep = if symbol.chars().all(char::is_alphabetic) && !symbol.is_empty() {
        " "
    } else {
        ""
    };
    let sign = if val < Decimal::ZERO && abs > Decimal::ZERO { "-" } else { "" };
    format!("{sign}{symbol}{sep}{with_commas}.{dec_part}")
}
