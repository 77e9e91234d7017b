use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, CategoryError, CategoryId, Transaction};

/// Full budget state of one month: total ceiling, categories and the
/// per-category transaction log.
///
/// Every mutation that touches a category's spent total also touches its
/// transaction list in the same call, so the two never diverge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredSnapshot", rename_all = "camelCase")]
pub(crate) struct BudgetSnapshot {
    pub(crate) total_budget: Decimal,
    #[serde(rename = "categorySpending")]
    pub(crate) categories: Vec<Category>,
    #[serde(rename = "categoryTransactions")]
    pub(crate) transactions: BTreeMap<CategoryId, Vec<Transaction>>,
}

impl Default for BudgetSnapshot {
    fn default() -> Self {
        let categories = Category::defaults();
        let transactions = categories.iter().map(|c| (c.id, Vec::new())).collect();
        Self {
            total_budget: Decimal::ZERO,
            categories,
            transactions,
        }
    }
}

impl BudgetSnapshot {
    /// Derived from the category list, never stored separately.
    pub(crate) fn total_spent(&self) -> Decimal {
        self.categories.iter().map(|c| c.spent).sum()
    }

    pub(crate) fn remaining(&self) -> Decimal {
        self.total_budget - self.total_spent()
    }

    pub(crate) fn category(&self, id: CategoryId) -> Option<&Category> {
        Category::find_by_id(&self.categories, id)
    }

    fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn transactions_for(&self, id: CategoryId) -> &[Transaction] {
        self.transactions.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of the logged transactions of one category.
    pub(crate) fn logged_total(&self, id: CategoryId) -> Decimal {
        self.transactions_for(id).iter().map(|t| t.amount).sum()
    }

    /// All transactions paired with their category, newest first.
    pub(crate) fn recent_transactions(&self) -> Vec<(&Category, &Transaction)> {
        let mut rows: Vec<(&Category, &Transaction)> = self
            .categories
            .iter()
            .flat_map(|c| self.transactions_for(c.id).iter().map(move |t| (c, t)))
            .collect();
        rows.sort_by(|a, b| b.1.date.cmp(&a.1.date));
        rows
    }

    pub(crate) fn add_transaction(&mut self, id: CategoryId, txn: Transaction) -> bool {
        let Some(category) = self.category_mut(id) else {
            return false;
        };
        category.spent += txn.amount;
        self.transactions.entry(id).or_default().insert(0, txn);
        true
    }

    /// Removes the first transaction stamped `date` and subtracts its own amount.
    pub(crate) fn delete_transaction(
        &mut self,
        id: CategoryId,
        date: DateTime<Utc>,
    ) -> Option<Transaction> {
        let list = self.transactions.get_mut(&id)?;
        let pos = list.iter().position(|t| t.date == date)?;
        let removed = list.remove(pos);
        if let Some(category) = self.category_mut(id) {
            category.record_removal(removed.amount);
        }
        Some(removed)
    }

    pub(crate) fn set_category_budget(&mut self, id: CategoryId, amount: Decimal) -> bool {
        match self.category_mut(id) {
            Some(category) => {
                category.budget = amount;
                true
            }
            None => false,
        }
    }

    pub(crate) fn reset_all(&mut self) {
        self.total_budget = Decimal::ZERO;
        for category in &mut self.categories {
            category.budget = Decimal::ZERO;
            category.spent = Decimal::ZERO;
        }
        self.transactions = self.categories.iter().map(|c| (c.id, Vec::new())).collect();
    }

    pub(crate) fn reset_category(&mut self, id: CategoryId) -> bool {
        let Some(category) = self.category_mut(id) else {
            return false;
        };
        category.budget = Decimal::ZERO;
        category.spent = Decimal::ZERO;
        self.transactions.insert(id, Vec::new());
        true
    }

    pub(crate) fn add_category(
        &mut self,
        name: &str,
        icon: &str,
        color: &str,
    ) -> Result<CategoryId, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if Category::find_by_name(&self.categories, name).is_some() {
            return Err(CategoryError::Duplicate(name.to_string()));
        }
        let id = CategoryId(self.categories.iter().map(|c| c.id.0).max().unwrap_or(0) + 1);
        self.categories
            .push(Category::new(id, name.to_string(), icon.to_string(), color.to_string()));
        self.transactions.insert(id, Vec::new());
        Ok(id)
    }

    pub(crate) fn rename_category(
        &mut self,
        id: CategoryId,
        name: &str,
    ) -> Result<(), CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if Category::find_by_name(&self.categories, name).is_some_and(|c| c.id != id) {
            return Err(CategoryError::Duplicate(name.to_string()));
        }
        let category = self.category_mut(id).ok_or(CategoryError::NotFound(id))?;
        category.name = name.to_string();
        Ok(())
    }

    /// Returns `Ok(false)` when the id is unknown.
    pub(crate) fn remove_category(&mut self, id: CategoryId) -> Result<bool, CategoryError> {
        let Some(pos) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        if self.categories[pos].is_default {
            return Err(CategoryError::DefaultCategory(self.categories[pos].name.clone()));
        }
        self.categories.remove(pos);
        self.transactions.remove(&id);
        Ok(true)
    }

    /// Recompute every spent total from the transaction log. Returns the
    /// categories whose stored total disagreed.
    pub(crate) fn reconcile(&mut self) -> Vec<CategoryId> {
        let logged: Vec<Decimal> = self
            .categories
            .iter()
            .map(|c| self.logged_total(c.id))
            .collect();
        let mut corrected = Vec::new();
        for (category, logged) in self.categories.iter_mut().zip(logged) {
            if category.spent != logged {
                category.spent = logged;
                corrected.push(category.id);
            }
        }
        corrected
    }
}

/// On-disk shape of a snapshot. Every field is optional, and the transaction
/// index may be keyed by category name (older data) or by category id.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSnapshot {
    total_budget: Option<Decimal>,
    category_spending: Option<Vec<Category>>,
    category_transactions: Option<BTreeMap<String, Vec<Transaction>>>,
}

impl From<StoredSnapshot> for BudgetSnapshot {
    fn from(stored: StoredSnapshot) -> Self {
        let defaults = BudgetSnapshot::default();
        let mut categories = stored.category_spending.unwrap_or(defaults.categories);
        for category in &mut categories {
            if Category::is_builtin(category.id, &category.name) {
                category.is_default = true;
            }
        }

        let mut transactions: BTreeMap<CategoryId, Vec<Transaction>> =
            categories.iter().map(|c| (c.id, Vec::new())).collect();
        for (key, list) in stored.category_transactions.unwrap_or_default() {
            let id = key
                .parse::<i64>()
                .ok()
                .map(CategoryId)
                .filter(|id| Category::find_by_id(&categories, *id).is_some())
                .or_else(|| Category::find_by_name(&categories, &key).map(|c| c.id));
            match id {
                Some(id) => transactions.entry(id).or_default().extend(list),
                None => tracing::warn!(
                    key = %key,
                    count = list.len(),
                    "dropping transactions of unknown category"
                ),
            }
        }

        let mut snapshot = Self {
            total_budget: stored.total_budget.unwrap_or(Decimal::ZERO),
            categories,
            transactions,
        };
        let corrected = snapshot.reconcile();
        if !corrected.is_empty() {
            tracing::warn!(?corrected, "spent totals disagreed with transaction log; recomputed");
        }
        snapshot
    }
}
