use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single recorded expense. The timestamp doubles as its identity within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    pub(crate) date: DateTime<Utc>,
    pub(crate) description: String,
    pub(crate) amount: Decimal,
}

impl Transaction {
    pub(crate) fn new(date: DateTime<Utc>, description: String, amount: Decimal) -> Self {
        Self {
            date,
            description,
            amount,
        }
    }

    /// A transaction stamped with the current time.
    pub(crate) fn now(description: String, amount: Decimal) -> Self {
        Self::new(Utc::now(), description, amount)
    }
}
