mod budget;
mod debounce;
mod locale;
mod theme;

pub(crate) use budget::{read_known_months, BudgetState, MonthTotal};
pub(crate) use debounce::Debounce;
pub(crate) use locale::{Language, LocaleState};
pub(crate) use theme::ThemeState;

use crate::config::Config;
use crate::models::MonthKey;
use crate::storage::KeyValueStore;

/// Owns every piece of client state. Built once per run and flushed on exit.
pub(crate) struct AppState {
    pub(crate) budget: BudgetState,
    pub(crate) theme: ThemeState,
    pub(crate) locale: LocaleState,
}

impl AppState {
    pub(crate) fn load(store: &dyn KeyValueStore, config: &Config, month: MonthKey) -> Self {
        Self {
            budget: BudgetState::load(store, month, config.save_delay),
            theme: ThemeState::load(store),
            locale: LocaleState::load(store),
        }
    }

    pub(crate) fn shutdown(&mut self, store: &dyn KeyValueStore) {
        self.budget.flush(store);
        tracing::info!("state flushed");
    }
}
