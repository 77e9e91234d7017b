mod category;
pub(crate) mod currency;
mod month;
mod snapshot;
mod transaction;

pub(crate) use category::{Category, CategoryError, CategoryId};
pub(crate) use month::{MonthKey, MonthKeyError};
pub(crate) use snapshot::BudgetSnapshot;
pub(crate) use transaction::Transaction;
