use crate::storage::{KeyValueStore, DARK_MODE_KEY};

#[derive(Debug, Clone, Default)]
pub(crate) struct ThemeState {
    dark_mode: bool,
}

impl ThemeState {
    pub(crate) fn load(store: &dyn KeyValueStore) -> Self {
        let dark_mode = match store.get(DARK_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme; using light");
                false
            }
        };
        Self { dark_mode }
    }

    pub(crate) fn is_dark(&self) -> bool {
        self.dark_mode
    }

    pub(crate) fn toggle(&mut self, store: &dyn KeyValueStore) {
        self.set_dark(!self.dark_mode, store);
    }

    pub(crate) fn set_dark(&mut self, dark: bool, store: &dyn KeyValueStore) {
        self.dark_mode = dark;
        let value = if dark { "true" } else { "false" };
        if let Err(e) = store.set(DARK_MODE_KEY, value) {
            tracing::warn!(error = %e, "could not save theme");
        }
    }
}
