use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct CategoryId(pub(crate) i64);

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum CategoryError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category '{0}' already exists")]
    Duplicate(String),
    #[error("'{0}' is a default category and cannot be removed")]
    DefaultCategory(String),
    #[error("Category {0} not found")]
    NotFound(CategoryId),
}

/// An expense bucket with its own ceiling and running spent total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Category {
    pub(crate) id: CategoryId,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) icon: String,
    #[serde(default)]
    pub(crate) color: String,
    #[serde(default)]
    pub(crate) budget: Decimal,
    /// Sum of this month's transactions. Stored as `amount`.
    #[serde(rename = "amount", default)]
    pub(crate) spent: Decimal,
    #[serde(default)]
    pub(crate) is_default: bool,
}

const DEFAULTS: [(i64, &str, &str, &str); 7] = [
    (1, "Food", "utensils", "#ef4444"),
    (2, "Education", "graduation-cap", "#3b82f6"),
    (3, "Bills", "file-invoice", "#f59e0b"),
    (4, "Doctor", "user-md", "#10b981"),
    (5, "Transport", "bus", "#8b5cf6"),
    (6, "Grocery", "shopping-basket", "#10b981"),
    (7, "Others", "ellipsis-h", "#6b7280"),
];

impl Category {
    pub(crate) fn new(id: CategoryId, name: String, icon: String, color: String) -> Self {
        Self {
            id,
            name,
            icon,
            color,
            budget: Decimal::ZERO,
            spent: Decimal::ZERO,
            is_default: false,
        }
    }

    /// The category set every new month starts with.
    pub(crate) fn defaults() -> Vec<Category> {
        DEFAULTS
            .iter()
            .map(|&(id, name, icon, color)| Category {
                is_default: true,
                ..Category::new(CategoryId(id), name.into(), icon.into(), color.into())
            })
            .collect()
    }

    pub(crate) fn is_builtin(id: CategoryId, name: &str) -> bool {
        DEFAULTS.iter().any(|&(d_id, d_name, _, _)| d_id == id.0 && d_name == name)
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub(crate) fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.trim().to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Find a category by ID in a slice.
    pub(crate) fn find_by_id(categories: &[Category], id: CategoryId) -> Option<&Category> {
        categories.iter().find(|c| c.id == id)
    }

    /// Subtract a removed transaction from the spent total, never going below zero.
    pub(crate) fn record_removal(&mut self, amount: Decimal) {
        self.spent = (self.spent - amount).max(Decimal::ZERO);
    }

    pub(crate) fn remaining(&self) -> Decimal {
        self.budget - self.spent
    }

    /// Fraction of the ceiling already spent, clamped to `0.0..=1.0`.
    pub(crate) fn usage_ratio(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        if self.budget > Decimal::ZERO {
            (self.spent / self.budget).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
