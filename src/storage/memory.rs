use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{KeyValueStore, StorageError};

/// In-memory store for tests. Counts writes and can be told to fail.
#[derive(Default)]
pub(crate) struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call return an error (or stop doing so).
    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// Keys written so far, in order, including repeats.
    pub(crate) fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    /// Put a raw value without recording a write.
    pub(crate) fn seed(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub(crate) fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.get() {
            Err(StorageError::Unavailable("injected failure".into()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.writes.borrow_mut().push(key.to_string());
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
