pub(crate) mod csv;
pub(crate) mod html;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{MonthKey, Transaction};
use crate::state::BudgetState;

/// Shown to the user when an export fails. Details go to the log.
pub(crate) const FAILURE_MESSAGE: &str = "Could not generate report";

pub(crate) struct CategoryReport {
    pub(crate) name: String,
    pub(crate) color: String,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
    pub(crate) transactions: Vec<Transaction>,
}

/// Read-only view of one month, detached from the live state.
pub(crate) struct ReportData {
    pub(crate) month: MonthKey,
    pub(crate) generated_on: NaiveDate,
    pub(crate) currency: String,
    pub(crate) total_budget: Decimal,
    pub(crate) total_spent: Decimal,
    pub(crate) remaining: Decimal,
    pub(crate) categories: Vec<CategoryReport>,
}

impl ReportData {
    pub(crate) fn from_state(state: &BudgetState) -> Self {
        let categories = state
            .categories()
            .iter()
            .map(|c| CategoryReport {
                name: c.name.clone(),
                color: c.color.clone(),
                budget: c.budget,
                spent: c.spent,
                transactions: state.transactions_for(c.id).to_vec(),
            })
            .collect();
        Self {
            month: state.month().clone(),
            generated_on: Local::now().date_naive(),
            currency: state.currency_symbol().to_string(),
            total_budget: state.total_budget(),
            total_spent: state.total_spent(),
            remaining: state.remaining(),
            categories,
        }
    }

    pub(crate) fn transaction_count(&self) -> usize {
        self.categories.iter().map(|c| c.transactions.len()).sum()
    }

    /// Share of the total budget already spent, in percent.
    pub(crate) fn utilisation(&self) -> f64 {
        percent(self.total_spent, self.total_budget)
    }

    /// Default file name for an export of this month.
    pub(crate) fn default_file_name(&self, extension: &str) -> String {
        format!("hisabkitab-{}.{extension}", self.month)
    }
}

/// `part` as a percentage of `whole`; 0.0 when `whole` is not positive.
pub(crate) fn percent(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    (part / whole * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

/// Write `bytes` to a hidden sibling and rename it over `path`, so a failed
/// export never leaves a partial file behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    let result = fs::File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(bytes)?;
            f.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result.with_context(|| format!("Failed to write {}", path.display()))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".into());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests;
