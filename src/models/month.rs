use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid month '{0}'. Use YYYY-MM (e.g. 2024-01)")]
pub(crate) struct MonthKeyError(pub(crate) String);

/// A calendar month in `YYYY-MM` form. Every budget snapshot is stored under one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct MonthKey(String);

impl MonthKey {
    pub(crate) fn parse(s: &str) -> Result<Self, MonthKeyError> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit);
        if !well_formed {
            return Err(MonthKeyError(s.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|_| MonthKeyError(s.to_string()))
    }

    /// Accepts a full `YYYY-MM` key, or a bare month number (`"3"`, `"03"`)
    /// taken from `base`'s year.
    pub(crate) fn parse_relative(s: &str, base: &MonthKey) -> Result<Self, MonthKeyError> {
        let trimmed = s.trim();
        if !trimmed.is_empty() && trimmed.len() <= 2 {
            return Self::parse(&format!("{}-{trimmed:0>2}", base.year()));
        }
        Self::parse(trimmed)
    }

    pub(crate) fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub(crate) fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m").to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn year(&self) -> &str {
        &self.0[..4]
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&format!("{}-01", self.0), "%Y-%m-%d").ok()
    }

    /// e.g. `2024-01` → `"January 2024"`
    pub(crate) fn label(&self) -> String {
        let name = self
            .first_day()
            .and_then(|d| MONTH_NAMES.get(d.month0() as usize))
            .copied()
            .unwrap_or("Unknown");
        format!("{name} {}", self.year())
    }

    /// Stays put at `9999-12`.
    pub(crate) fn next(&self) -> Self {
        self.first_day()
            .and_then(|d| d.checked_add_months(Months::new(1)))
            .filter(|d| d.year() <= 9999)
            .map(Self::from_date)
            .unwrap_or_else(|| self.clone())
    }

    /// Stays put at `0000-01`.
    pub(crate) fn prev(&self) -> Self {
        self.first_day()
            .and_then(|d| d.checked_sub_months(Months::new(1)))
            .filter(|d| d.year() >= 0)
            .map(Self::from_date)
            .unwrap_or_else(|| self.clone())
    }

    /// Storage key of this month's budget snapshot.
    pub(crate) fn storage_key(&self) -> String {
        format!("budgetData_{}", self.0)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
