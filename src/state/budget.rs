use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::Debounce;
use crate::models::{
    currency, BudgetSnapshot, Category, CategoryError, CategoryId, MonthKey, Transaction,
};
use crate::storage::{self, KeyValueStore, StorageError, AVAILABLE_MONTHS_KEY, CURRENCY_KEY};

/// Stored totals of one month, as shown in the spending trend.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MonthTotal {
    pub(crate) month: MonthKey,
    pub(crate) budget: Decimal,
    pub(crate) spent: Decimal,
}

/// The active month's budget, its categories and transactions, plus the
/// currency preference.
///
/// Mutations apply in memory at once and arm a single debounced write. The
/// caller drives persistence with [`BudgetState::tick`] and
/// [`BudgetState::flush`].
pub(crate) struct BudgetState {
    month: MonthKey,
    snapshot: BudgetSnapshot,
    known_months: Vec<MonthKey>,
    /// False when the stored month list could not be read at all; it is then
    /// never overwritten.
    months_readable: bool,
    currency: String,
    save: Debounce,
}

/// Stored month registry. Entries that are not valid `YYYY-MM` keys are
/// dropped with a warning so one bad entry cannot hide the rest.
pub(crate) fn read_known_months(
    store: &dyn KeyValueStore,
) -> Result<Vec<MonthKey>, StorageError> {
    let raw: Vec<String> = storage::get_json(store, AVAILABLE_MONTHS_KEY)?.unwrap_or_default();
    let mut months: Vec<MonthKey> = raw
        .iter()
        .filter_map(|entry| match MonthKey::parse(entry) {
            Ok(month) => Some(month),
            Err(e) => {
                tracing::warn!(error = %e, "dropping unreadable month entry");
                None
            }
        })
        .collect();
    months.sort();
    months.dedup();
    Ok(months)
}

impl BudgetState {
    pub(crate) fn load(store: &dyn KeyValueStore, month: MonthKey, save_delay: Duration) -> Self {
        let (known_months, months_readable) = match read_known_months(store) {
            Ok(months) => (months, true),
            Err(e) => {
                tracing::warn!(error = %e, "could not read known months; leaving them untouched");
                (Vec::new(), false)
            }
        };
        let currency = match store.get(CURRENCY_KEY) {
            Ok(Some(symbol)) if !symbol.trim().is_empty() => symbol,
            Ok(Some(_)) => {
                // A blank preference means "unset"
                if let Err(e) = store.remove(CURRENCY_KEY) {
                    tracing::warn!(error = %e, "could not clear blank currency symbol");
                }
                currency::DEFAULT_SYMBOL.to_string()
            }
            Ok(None) => currency::DEFAULT_SYMBOL.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read currency symbol; using default");
                currency::DEFAULT_SYMBOL.to_string()
            }
        };

        let mut state = Self {
            month: month.clone(),
            snapshot: BudgetSnapshot::default(),
            known_months,
            months_readable,
            currency,
            save: Debounce::new(save_delay),
        };
        state.load_month(store, month);
        state
    }

    /// Replace the in-memory snapshot with the stored one for `month`.
    /// A month with nothing stored starts from defaults and is queued for a
    /// write so it gets registered. Read failures fall back to defaults.
    fn load_month(&mut self, store: &dyn KeyValueStore, month: MonthKey) {
        let key = month.storage_key();
        self.month = month;
        self.save.cancel();
        self.snapshot = match storage::get_json::<BudgetSnapshot>(store, &key) {
            Ok(Some(snapshot)) => {
                tracing::debug!(month = %self.month, "loaded snapshot");
                snapshot
            }
            Ok(None) => {
                tracing::info!(month = %self.month, "new month; starting from defaults");
                self.save.schedule(Instant::now());
                BudgetSnapshot::default()
            }
            Err(e) => {
                tracing::warn!(
                    month = %self.month,
                    error = %e,
                    "could not load snapshot; using defaults"
                );
                BudgetSnapshot::default()
            }
        };
    }

    // ── Reads ─────────────────────────────────────────────────

    pub(crate) fn month(&self) -> &MonthKey {
        &self.month
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> &BudgetSnapshot {
        &self.snapshot
    }

    pub(crate) fn total_budget(&self) -> Decimal {
        self.snapshot.total_budget
    }

    pub(crate) fn categories(&self) -> &[Category] {
        &self.snapshot.categories
    }

    pub(crate) fn category(&self, id: CategoryId) -> Option<&Category> {
        self.snapshot.category(id)
    }

    pub(crate) fn find_category(&self, name: &str) -> Option<&Category> {
        Category::find_by_name(&self.snapshot.categories, name)
    }

    pub(crate) fn transactions_for(&self, id: CategoryId) -> &[Transaction] {
        self.snapshot.transactions_for(id)
    }

    pub(crate) fn total_spent(&self) -> Decimal {
        self.snapshot.total_spent()
    }

    pub(crate) fn remaining(&self) -> Decimal {
        self.snapshot.remaining()
    }

    pub(crate) fn recent_transactions(&self) -> Vec<(&Category, &Transaction)> {
        self.snapshot.recent_transactions()
    }

    pub(crate) fn currency_symbol(&self) -> &str {
        &self.currency
    }

    /// Known months plus the active one, oldest first.
    pub(crate) fn available_months(&self) -> Vec<MonthKey> {
        let mut months = self.known_months.clone();
        if !months.contains(&self.month) {
            months.push(self.month.clone());
        }
        months.sort();
        months.dedup();
        months
    }

    /// Budget and spent of every known month. The active month comes from
    /// memory; the others from storage, skipping any that cannot be read.
    pub(crate) fn month_totals(&self, store: &dyn KeyValueStore) -> Vec<MonthTotal> {
        self.available_months()
            .into_iter()
            .filter_map(|month| {
                if month == self.month {
                    return Some(MonthTotal {
                        budget: self.total_budget(),
                        spent: self.total_spent(),
                        month,
                    });
                }
                match storage::get_json::<BudgetSnapshot>(store, &month.storage_key()) {
                    Ok(Some(snap)) => Some(MonthTotal {
                        budget: snap.total_budget,
                        spent: snap.total_spent(),
                        month,
                    }),
                    Ok(None) => None,
                    Err(e) => {
                        tracing::warn!(month = %month, error = %e, "skipping unreadable month");
                        None
                    }
                }
            })
            .collect()
    }

    // ── Mutations ─────────────────────────────────────────────

    pub(crate) fn set_total_budget(&mut self, amount: Decimal) {
        self.snapshot.total_budget = amount;
        self.touch();
    }

    pub(crate) fn add_transaction(&mut self, id: CategoryId, txn: Transaction) -> bool {
        let added = self.snapshot.add_transaction(id, txn);
        if added {
            self.touch();
        }
        added
    }

    pub(crate) fn delete_transaction(
        &mut self,
        id: CategoryId,
        date: DateTime<Utc>,
    ) -> Option<Transaction> {
        let removed = self.snapshot.delete_transaction(id, date);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub(crate) fn reset_all_budgets(&mut self) {
        self.snapshot.reset_all();
        self.touch();
    }

    pub(crate) fn reset_category_budget(&mut self, id: CategoryId) -> bool {
        let reset = self.snapshot.reset_category(id);
        if reset {
            self.touch();
        }
        reset
    }

    pub(crate) fn set_category_budget(&mut self, id: CategoryId, amount: Decimal) -> bool {
        let set = self.snapshot.set_category_budget(id, amount);
        if set {
            self.touch();
        }
        set
    }

    pub(crate) fn add_category(
        &mut self,
        name: &str,
        icon: &str,
        color: &str,
    ) -> Result<CategoryId, CategoryError> {
        let id = self.snapshot.add_category(name, icon, color)?;
        self.touch();
        Ok(id)
    }

    pub(crate) fn rename_category(
        &mut self,
        id: CategoryId,
        name: &str,
    ) -> Result<(), CategoryError> {
        self.snapshot.rename_category(id, name)?;
        self.touch();
        Ok(())
    }

    pub(crate) fn remove_category(&mut self, id: CategoryId) -> Result<bool, CategoryError> {
        let removed = self.snapshot.remove_category(id)?;
        if removed {
            self.touch();
        }
        Ok(removed)
    }

    /// Flush the outgoing month, then load `month`.
    pub(crate) fn set_current_month(&mut self, month: MonthKey, store: &dyn KeyValueStore) {
        if month == self.month {
            return;
        }
        self.flush(store);
        tracing::info!(from = %self.month, to = %month, "switching month");
        self.load_month(store, month);
    }

    /// Written at once, not debounced.
    pub(crate) fn set_currency_symbol(&mut self, symbol: &str, store: &dyn KeyValueStore) {
        let symbol = symbol.trim();
        if symbol.is_empty() || symbol == self.currency {
            return;
        }
        self.currency = symbol.to_string();
        if let Err(e) = store.set(CURRENCY_KEY, &self.currency) {
            tracing::warn!(error = %e, "could not save currency symbol");
        }
    }

    // ── Persistence ───────────────────────────────────────────

    fn touch(&mut self) {
        self.save.schedule(Instant::now());
    }

    pub(crate) fn has_pending_write(&self) -> bool {
        self.save.is_pending()
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.save.due_at()
    }

    /// Write the snapshot if the quiet period has elapsed. Returns whether a
    /// write was attempted.
    pub(crate) fn tick(&mut self, now: Instant, store: &dyn KeyValueStore) -> bool {
        if self.save.fire(now) {
            self.write(store);
            true
        } else {
            false
        }
    }

    pub(crate) fn flush(&mut self, store: &dyn KeyValueStore) {
        if self.save.is_pending() {
            self.save.cancel();
            self.write(store);
        }
    }

    fn write(&mut self, store: &dyn KeyValueStore) {
        let key = self.month.storage_key();
        if let Err(e) = storage::set_json(store, &key, &self.snapshot) {
            tracing::warn!(month = %self.month, error = %e, "could not save snapshot");
            return;
        }
        tracing::debug!(month = %self.month, "saved snapshot");

        if !self.known_months.contains(&self.month) {
            self.known_months.push(self.month.clone());
            self.known_months.sort();
            if !self.months_readable {
                tracing::warn!(month = %self.month, "known months unreadable; not registering");
                return;
            }
            if let Err(e) = storage::set_json(store, AVAILABLE_MONTHS_KEY, &self.known_months) {
                tracing::warn!(error = %e, "could not save known months");
            }
        }
    }
}
